use crate::errors::CatalogError;
use crate::models::{Category, NewImage, NewProduct, ProductChanges};
use serde::{Deserialize, Deserializer, Serialize};
use serde_valid::Validate;

/// Raw list parameters. Everything stays a string so that bad input can fall
/// back to defaults instead of failing extraction.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Image entry of a product body: a bare URL or `{url, alt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageInput {
    Url(String),
    Detailed { url: String, alt: Option<String> },
}

impl ImageInput {
    pub fn url(&self) -> &str {
        match self {
            ImageInput::Url(url) => url,
            ImageInput::Detailed { url, .. } => url,
        }
    }
}

impl From<ImageInput> for NewImage {
    fn from(input: ImageInput) -> Self {
        match input {
            ImageInput::Url(url) => NewImage { url, alt: None },
            ImageInput::Detailed { url, alt } => NewImage { url, alt },
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(max_length = 255)]
    pub name: Option<String>,
    #[validate(max_length = 10000)]
    pub description: Option<String>,
    #[validate(minimum = 0.0)]
    pub price: Option<f64>,
    pub category: Option<String>,
    #[validate(max_length = 255)]
    pub brand: Option<String>,
    #[validate(minimum = 0)]
    pub stock: Option<i32>,
    pub images: Option<Vec<ImageInput>>,
}

impl ProductForm {
    /// Checks required fields and constraints, producing the store input.
    pub fn into_new_product(self, creator_id: Option<String>) -> Result<NewProduct, CatalogError> {
        if let Err(errors) = self.validate() {
            return Err(CatalogError::Validation(errors.to_string()));
        }

        let name = non_blank(self.name);
        let description = non_blank(self.description);
        let (name, description, price, category) =
            match (name, description, self.price, non_blank(self.category)) {
                (Some(name), Some(description), Some(price), Some(category)) => {
                    (name, description, price, category)
                }
                _ => {
                    return Err(CatalogError::Validation(
                        "Please provide all required fields: name, description, price, category"
                            .to_string(),
                    ))
                }
            };

        let category = parse_category(&category)?;
        let images = convert_images(self.images.unwrap_or_default())?;

        Ok(NewProduct {
            name,
            description,
            price,
            category,
            brand: non_blank(self.brand),
            stock: self.stock.unwrap_or(0),
            creator_id,
            images,
        })
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUpdateForm {
    #[validate(max_length = 255)]
    pub name: Option<String>,
    #[validate(max_length = 10000)]
    pub description: Option<String>,
    #[validate(minimum = 0.0)]
    pub price: Option<f64>,
    pub category: Option<String>,
    // present-but-null clears the brand, absent leaves it alone
    #[serde(default, deserialize_with = "present")]
    pub brand: Option<Option<String>>,
    #[validate(minimum = 0)]
    pub stock: Option<i32>,
    pub images: Option<Vec<ImageInput>>,
}

impl ProductUpdateForm {
    pub fn into_changes(self) -> Result<ProductChanges, CatalogError> {
        if let Err(errors) = self.validate() {
            return Err(CatalogError::Validation(errors.to_string()));
        }

        let category = match non_blank(self.category) {
            Some(category) => Some(parse_category(&category)?),
            None => None,
        };
        let images = match self.images {
            Some(images) => Some(convert_images(images)?),
            None => None,
        };

        Ok(ProductChanges {
            name: non_blank(self.name),
            description: non_blank(self.description),
            price: self.price,
            category,
            brand: self.brand.map(non_blank),
            stock: self.stock,
            images,
        })
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_category(value: &str) -> Result<String, CatalogError> {
    value
        .parse::<Category>()
        .map(String::from)
        .map_err(CatalogError::Validation)
}

fn convert_images(images: Vec<ImageInput>) -> Result<Vec<NewImage>, CatalogError> {
    if images.iter().any(|image| image.url().trim().is_empty()) {
        return Err(CatalogError::Validation("Image url must not be empty".to_string()));
    }

    Ok(images.into_iter().map(NewImage::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: serde_json::Value) -> ProductForm {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn builds_new_product() {
        let new_product = form(json!({
            "name": "Nike Air Max 270",
            "description": "Running shoes",
            "price": 150.0,
            "category": "sports",
            "brand": "Nike",
            "stock": 25,
            "images": ["a", {"url": "b", "alt": "side"}]
        }))
        .into_new_product(Some("admin-1".to_string()))
        .unwrap();

        assert_eq!(new_product.category, "SPORTS");
        assert_eq!(new_product.stock, 25);
        assert_eq!(new_product.creator_id.as_deref(), Some("admin-1"));
        assert_eq!(
            new_product.images,
            vec![
                NewImage { url: "a".to_string(), alt: None },
                NewImage { url: "b".to_string(), alt: Some("side".to_string()) },
            ]
        );
    }

    #[test]
    fn missing_price_is_rejected() {
        let err = form(json!({
            "name": "Lamp",
            "description": "Desk lamp",
            "category": "HOME"
        }))
        .into_new_product(None)
        .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn zero_price_is_allowed() {
        let new_product = form(json!({
            "name": "Sticker",
            "description": "Free sticker",
            "price": 0,
            "category": "other"
        }))
        .into_new_product(None)
        .unwrap();
        assert_eq!(new_product.price, 0.0);
        assert_eq!(new_product.stock, 0);
        assert_eq!(new_product.brand, None);
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = form(json!({
            "name": "Lamp",
            "description": "Desk lamp",
            "price": -1,
            "category": "HOME"
        }))
        .into_new_product(None)
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = form(json!({
            "name": "Lamp",
            "description": "Desk lamp",
            "price": 10,
            "category": "HOME",
            "stock": -5
        }))
        .into_new_product(None)
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = form(json!({
            "name": "Robot",
            "description": "Toy robot",
            "price": 10,
            "category": "toys"
        }))
        .into_new_product(None)
        .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(msg) if msg.contains("toys")));
    }

    #[test]
    fn blank_brand_means_no_brand() {
        let new_product = form(json!({
            "name": "Mug",
            "description": "Coffee mug",
            "price": 5,
            "category": "home",
            "brand": "   "
        }))
        .into_new_product(None)
        .unwrap();
        assert_eq!(new_product.brand, None);
    }

    #[test]
    fn update_distinguishes_absent_and_null_brand() {
        let absent: ProductUpdateForm = serde_json::from_value(json!({"stock": 3})).unwrap();
        let changes = absent.into_changes().unwrap();
        assert_eq!(changes.brand, None);
        assert_eq!(changes.stock, Some(3));
        assert_eq!(changes.images, None);

        let cleared: ProductUpdateForm = serde_json::from_value(json!({"brand": null})).unwrap();
        assert_eq!(cleared.into_changes().unwrap().brand, Some(None));

        let emptied: ProductUpdateForm = serde_json::from_value(json!({"brand": ""})).unwrap();
        assert_eq!(emptied.into_changes().unwrap().brand, Some(None));
    }

    #[test]
    fn update_with_empty_image_list_clears_images() {
        let form: ProductUpdateForm = serde_json::from_value(json!({"images": []})).unwrap();
        assert_eq!(form.into_changes().unwrap().images, Some(vec![]));
    }

    #[test]
    fn empty_image_url_is_rejected() {
        let form: ProductUpdateForm =
            serde_json::from_value(json!({"images": [{"url": ""}]})).unwrap();
        assert!(form.into_changes().is_err());
    }
}
