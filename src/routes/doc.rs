use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{
            LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest, UserList,
            UserPayload,
        },
        categories::{CategoryList, CategoryPayload, CategoryUpload},
        orders::{OrderList, OrderPayload, OrderRequest},
        products::{ProductList, ProductPayload, ProductRequest, ProductSearch},
    },
    models::{Category, Order, Product, User},
    response::{ApiResponse, Empty, ErrorBody},
    routes::{auth, categories, health, orders, products},
    validation::ValidationErrors,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        auth::list_users,
        auth::get_user,
        auth::update_user,
        auth::delete_user,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        products::list_products,
        products::get_product,
        products::search_products,
        products::create_product,
        products::update_product,
        products::delete_product,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order,
        orders::delete_order
    ),
    components(
        schemas(
            User,
            Category,
            Product,
            Order,
            RegisterRequest,
            LoginRequest,
            UpdateUserRequest,
            LoginResponse,
            UserPayload,
            UserList,
            CategoryUpload,
            CategoryPayload,
            CategoryList,
            ProductRequest,
            ProductPayload,
            ProductList,
            ProductSearch,
            OrderRequest,
            OrderPayload,
            OrderList,
            Empty,
            ErrorBody,
            ValidationErrors,
            ApiResponse<ProductPayload>,
            ApiResponse<ProductList>,
            ApiResponse<CategoryPayload>,
            ApiResponse<OrderPayload>,
            ApiResponse<UserPayload>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Registration, tokens and user management"),
        (name = "Categories", description = "Product category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
