//! Translation of raw list parameters into a product predicate and a page window.
//!
//! The same [`ProductFilter`] value is handed to both the count and the fetch,
//! so the two can never disagree on what "matching" means.

use crate::forms::ListQuery;
use crate::models::Product;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Category value meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "all";

/// Inclusive price bounds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

/// Predicate over products. Clauses are AND-combined; `None` imposes nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Exact match against the stored, upper-cased category.
    pub category: Option<String>,
    /// Case-insensitive substring of the brand.
    pub brand: Option<String>,
    pub price: Option<PriceRange>,
    /// Case-insensitive substring of name OR description.
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }

        if let Some(brand) = &self.brand {
            match &product.brand {
                Some(value) if contains_ignore_case(value, brand) => {}
                _ => return false,
            }
        }

        if let Some(range) = &self.price {
            if !range.contains(product.price) {
                return false;
            }
        }

        if let Some(term) = &self.search {
            if !contains_ignore_case(&product.name, term)
                && !contains_ignore_case(&product.description, term)
            {
                return false;
            }
        }

        true
    }
}

/// Requested page and page size, both >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub limit: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Paging {
    /// `skip` saturates; a page past the end just comes back empty.
    pub fn window(&self) -> Window {
        Window {
            skip: (i64::from(self.page) - 1).saturating_mul(i64::from(self.limit)),
            take: i64::from(self.limit),
        }
    }
}

/// Rows to skip and rows to take from the ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: i64,
    pub take: i64,
}

/// Builds the predicate and paging for a list request.
pub fn build(query: &ListQuery) -> (ProductFilter, Paging) {
    let category = present(&query.category)
        .filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES))
        .map(|c| c.to_uppercase());

    let min = present(&query.min_price).and_then(parse_price);
    let max = present(&query.max_price).and_then(parse_price);
    let price = (min.is_some() || max.is_some()).then_some(PriceRange { min, max });

    let filter = ProductFilter {
        category,
        brand: present(&query.brand).map(str::to_string),
        price,
        search: present(&query.search).map(str::to_string),
    };

    let paging = Paging {
        page: positive_or(&query.page, DEFAULT_PAGE),
        limit: positive_or(&query.limit, DEFAULT_LIMIT),
    };

    (filter, paging)
}

/// `%term%` for LIKE/ILIKE with the LIKE metacharacters escaped.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_price(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn positive_or(value: &Option<String>, default: u32) -> u32 {
    present(value)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let mut q = ListQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "category" => q.category = value,
                "brand" => q.brand = value,
                "minPrice" => q.min_price = value,
                "maxPrice" => q.max_price = value,
                "search" => q.search = value,
                "page" => q.page = value,
                "limit" => q.limit = value,
                other => panic!("unknown key {other}"),
            }
        }
        q
    }

    fn product(name: &str, description: &str, category: &str, brand: Option<&str>, price: f64) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            brand: brand.map(str::to_string),
            stock: 1,
            creator_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_query_is_open() {
        let (filter, paging) = build(&ListQuery::default());
        assert_eq!(filter, ProductFilter::default());
        assert_eq!(paging, Paging { page: 1, limit: 10 });
        assert_eq!(paging.window(), Window { skip: 0, take: 10 });
    }

    #[test]
    fn category_is_upper_cased_and_all_is_ignored() {
        let (filter, _) = build(&query(&[("category", "sports")]));
        assert_eq!(filter.category.as_deref(), Some("SPORTS"));

        let (filter, _) = build(&query(&[("category", "all")]));
        assert_eq!(filter.category, None);

        let (filter, _) = build(&query(&[("category", "ALL")]));
        assert_eq!(filter.category, None);
    }

    #[test]
    fn price_bounds() {
        let (filter, _) = build(&query(&[("minPrice", "100"), ("maxPrice", "200")]));
        let range = filter.price.unwrap();
        assert!(!range.contains(99.99));
        assert!(range.contains(150.0));
        assert!(range.contains(100.0));
        assert!(range.contains(200.0));
        assert!(!range.contains(200.01));

        let (filter, _) = build(&query(&[("maxPrice", "50")]));
        assert_eq!(filter.price, Some(PriceRange { min: None, max: Some(50.0) }));

        let (filter, _) = build(&query(&[("minPrice", "cheap")]));
        assert_eq!(filter.price, None);
    }

    #[test]
    fn paging_falls_back_to_defaults() {
        for (page, limit) in [("0", "-3"), ("abc", ""), ("-1", "ten"), ("2.5", "0")] {
            let (_, paging) = build(&query(&[("page", page), ("limit", limit)]));
            assert_eq!(paging, Paging::default(), "page={page} limit={limit}");
        }

        let (_, paging) = build(&query(&[("page", "3"), ("limit", "25")]));
        assert_eq!(paging.window(), Window { skip: 50, take: 25 });
    }

    #[test]
    fn huge_paging_does_not_overflow() {
        let max = u32::MAX.to_string();
        let (_, paging) = build(&query(&[("page", &max), ("limit", &max)]));
        assert_eq!(paging, Paging { page: u32::MAX, limit: u32::MAX });

        let window = paging.window();
        assert_eq!(window.skip, i64::MAX);
        assert_eq!(window.take, i64::from(u32::MAX));
    }

    #[test]
    fn search_matches_name_or_description() {
        let (filter, _) = build(&query(&[("search", "phone")]));

        assert!(filter.matches(&product("iPhone 15 Pro", "A17 chip", "ELECTRONICS", None, 999.0)));
        assert!(filter.matches(&product("Pixel 8", "Google smartPHONE", "ELECTRONICS", None, 699.0)));
        assert!(!filter.matches(&product("Kindle", "E-reader", "ELECTRONICS", None, 99.0)));
    }

    #[test]
    fn brand_is_case_insensitive_substring() {
        let (filter, _) = build(&query(&[("brand", "bal")]));
        assert!(filter.matches(&product("990v5", "Sneakers", "SPORTS", Some("New Balance"), 175.0)));
        assert!(!filter.matches(&product("Chuck", "Sneakers", "SPORTS", Some("Converse"), 65.0)));
        assert!(!filter.matches(&product("Plain", "Sneakers", "SPORTS", None, 65.0)));
    }

    #[test]
    fn clauses_are_and_combined() {
        let (filter, _) = build(&query(&[
            ("category", "SPORTS"),
            ("minPrice", "100"),
            ("search", "running"),
        ]));

        assert!(filter.matches(&product("Ultraboost", "Running shoes", "SPORTS", None, 180.0)));
        assert!(!filter.matches(&product("Ultraboost", "Running shoes", "SPORTS", None, 90.0)));
        assert!(!filter.matches(&product("Treadmill", "Running machine", "HOME", None, 900.0)));
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(contains_pattern("phone"), "%phone%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
