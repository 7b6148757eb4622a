use models::product::Product;
use serde::{Deserialize, Serialize};

/// Externally visible product shape, field-for-field isomorphic to
/// [`Product`] including the identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(default)]
    pub observation: Option<String>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            quantity: p.quantity,
            price: p.price,
            observation: p.observation,
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            quantity: dto.quantity,
            price: dto.price,
            observation: dto.observation,
        }
    }
}
