use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of product categories. Stored upper-cased.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Clothing,
        Category::Books,
        Category::Home,
        Category::Sports,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "ELECTRONICS",
            Category::Clothing => "CLOTHING",
            Category::Books => "BOOKS",
            Category::Home => "HOME",
            Category::Sports => "SPORTS",
            Category::Other => "OTHER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.trim().to_uppercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == upper)
            .ok_or_else(|| format!("Invalid category: {}", value.trim()))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_case() {
        assert_eq!("sports".parse::<Category>(), Ok(Category::Sports));
        assert_eq!(" Electronics ".parse::<Category>(), Ok(Category::Electronics));
        assert_eq!("HOME".parse::<Category>(), Ok(Category::Home));
    }

    #[test]
    fn rejects_unknown() {
        assert!("toys".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn serializes_upper_case() {
        let json = serde_json::to_string(&Category::Books).unwrap();
        assert_eq!(json, "\"BOOKS\"");
    }
}
