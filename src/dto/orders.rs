use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{MAX_AMOUNT, scalar, take, take_decimal},
    error::AppResult,
    models::Order,
    validation::{FieldRules, Input, Rule, Validatable},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderRequest {
    #[serde(default, deserialize_with = "scalar")]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    #[schema(example = "19.90")]
    pub total_price: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub payment_mode: Option<String>,
}

impl Validatable for OrderRequest {
    fn rules() -> &'static [FieldRules] {
        const RULES: &[FieldRules] = &[
            FieldRules::new("client_name", &[Rule::Required]),
            FieldRules::new(
                "total_price",
                &[
                    Rule::Required,
                    Rule::Numeric,
                    Rule::Min(0),
                    Rule::Max(MAX_AMOUNT),
                    Rule::Decimals(2),
                ],
            ),
            FieldRules::new("payment_mode", &[Rule::Required]),
        ];
        RULES
    }

    fn input(&self) -> Input<'_> {
        Input::new()
            .text("client_name", self.client_name.as_deref())
            .text("total_price", self.total_price.as_deref())
            .text("payment_mode", self.payment_mode.as_deref())
    }
}

pub struct OrderFields {
    pub client_name: String,
    pub total_price: Decimal,
    pub payment_mode: String,
}

impl OrderRequest {
    pub fn into_fields(self) -> AppResult<OrderFields> {
        Ok(OrderFields {
            client_name: take("client_name", self.client_name)?,
            total_price: take_decimal("total_price", self.total_price)?,
            payment_mode: take("payment_mode", self.payment_mode)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderPayload {
    pub order: Order,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub count: usize,
    pub orders: Vec<Order>,
}
