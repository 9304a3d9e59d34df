use axum::extract::Multipart;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::take,
    error::AppResult,
    models::Category,
    storage::{UploadPolicy, UploadedFile},
    validation::{FieldRules, Input, Rule, Validatable},
};

/// Category images: common web image formats, 2 MB at most.
pub const IMAGE_POLICY: UploadPolicy = UploadPolicy {
    allowed: &["jpeg", "png", "jpg", "gif", "svg"],
    max_kilobytes: 2048,
};

/// Multipart body of category store/update.
#[derive(Debug, Default)]
pub struct CategoryForm {
    pub name: Option<String>,
    pub image: Option<UploadedFile>,
}

impl CategoryForm {
    /// Read the `name` and `image` parts; unknown parts are drained and ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = CategoryForm::default();
        while let Some(field) = multipart.next_field().await? {
            let part = field.name().map(str::to_string);
            match part.as_deref() {
                Some("name") => form.name = Some(field.text().await?),
                Some("image") => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    form.image = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                _ => {
                    field.bytes().await?;
                }
            }
        }
        Ok(form)
    }

    /// Split into the validated name and the image to store.
    pub fn into_parts(self) -> AppResult<(String, UploadedFile)> {
        let name = take("name", self.name)?;
        let image = self.image.unwrap_or_else(|| UploadedFile {
            file_name: None,
            content_type: None,
            bytes: Default::default(),
        });
        Ok((name, image))
    }
}

impl Validatable for CategoryForm {
    fn rules() -> &'static [FieldRules] {
        const RULES: &[FieldRules] = &[
            FieldRules::new(
                "name",
                &[
                    Rule::Required,
                    Rule::Unique {
                        table: "categories",
                        column: "name",
                    },
                ],
            ),
            FieldRules::new(
                "image",
                &[
                    Rule::Required,
                    Rule::Image,
                    Rule::Mimes(IMAGE_POLICY.allowed),
                    Rule::MaxKilobytes(IMAGE_POLICY.max_kilobytes),
                ],
            )
            .with_messages(&[("mimes", "The image format is not valid.")]),
        ];
        RULES
    }

    fn input(&self) -> Input<'_> {
        Input::new()
            .text("name", self.name.as_deref())
            .file("image", self.image.as_ref())
    }
}

/// OpenAPI shape of the multipart body.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CategoryUpload {
    pub name: String,
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPayload {
    pub category: Category,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryList {
    pub count: usize,
    pub categories: Vec<Category>,
}
