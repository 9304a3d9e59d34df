pub mod audit_logs;
pub mod categories;
pub mod orders;
pub mod personal_access_tokens;
pub mod products;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use orders::Entity as Orders;
pub use personal_access_tokens::Entity as PersonalAccessTokens;
pub use products::Entity as Products;
pub use users::Entity as Users;
