use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{MAX_AMOUNT, scalar, take, take_decimal, take_i32},
    error::AppResult,
    models::Product,
    validation::{FieldRules, Input, Rule, Validatable},
};

/// Body of product store and update. Update is a full overwrite, so both use the same rules.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductRequest {
    #[serde(default, deserialize_with = "scalar")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    #[schema(example = "9.99")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub image: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "scalar")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    #[schema(example = "5")]
    pub quantity: Option<String>,
}

impl Validatable for ProductRequest {
    fn rules() -> &'static [FieldRules] {
        const RULES: &[FieldRules] = &[
            FieldRules::new(
                "name",
                &[
                    Rule::Required,
                    Rule::Unique {
                        table: "products",
                        column: "name",
                    },
                ],
            ),
            FieldRules::new("description", &[Rule::Required]),
            FieldRules::new(
                "price",
                &[
                    Rule::Required,
                    Rule::Numeric,
                    Rule::Min(0),
                    Rule::Max(MAX_AMOUNT),
                    Rule::Decimals(2),
                ],
            ),
            FieldRules::new("image", &[Rule::Required]),
            FieldRules::new("type", &[Rule::Required]),
            FieldRules::new(
                "quantity",
                &[
                    Rule::Required,
                    Rule::Integer,
                    Rule::Min(1),
                    Rule::Max(i32::MAX as i64),
                ],
            ),
        ];
        RULES
    }

    fn input(&self) -> Input<'_> {
        Input::new()
            .text("name", self.name.as_deref())
            .text("description", self.description.as_deref())
            .text("price", self.price.as_deref())
            .text("image", self.image.as_deref())
            .text("type", self.kind.as_deref())
            .text("quantity", self.quantity.as_deref())
    }
}

pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub kind: String,
    pub quantity: i32,
}

impl ProductRequest {
    pub fn into_fields(self) -> AppResult<ProductFields> {
        Ok(ProductFields {
            name: take("name", self.name)?,
            description: take("description", self.description)?,
            price: take_decimal("price", self.price)?,
            image: take("image", self.image)?,
            kind: take("type", self.kind)?,
            quantity: take_i32("quantity", self.quantity)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPayload {
    pub product: Product,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub count: usize,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSearch {
    pub products: Vec<Product>,
}
