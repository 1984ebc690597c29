use sea_orm::entity::prelude::*;
use serde::Serialize;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub specs: String,
    pub price: f32,
    pub brand: Brand,
    //JSON-encoded list of image urls, first one is the cover.
    #[sea_orm(column_type = "Text")]
    pub images: String,
    pub created_at: DateTimeUtc,
}

impl Model {
    pub fn image_list(&self) -> Vec<String> {
        serde_json::from_str(&self.images).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter, DeriveActiveEnum, Serialize)]
#[sea_orm(
    enum_name = "brand_enum",
    db_type = "String(StringLen::N(255))",
    rs_type = "String"
)]
pub enum Brand {
    #[sea_orm(string_value = "Nishat")]
    Nishat,
    #[sea_orm(string_value = "Junaid Jamshaid")]
    JunaidJamshaid,
    #[sea_orm(string_value = "Beechtree")]
    Beechtree,
}

impl Brand {
    //display order of the brand sections on the storefront
    pub const ALL: [Brand; 3] = [Brand::Nishat, Brand::JunaidJamshaid, Brand::Beechtree];
}

impl FromStr for Brand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Nishat" => Ok(Self::Nishat),
            "Junaid Jamshaid" => Ok(Self::JunaidJamshaid),
            "Beechtree" => Ok(Self::Beechtree),
            _ => Err(format!("Invalid brand: {}", s)),
        }
    }
}

impl ToString for Brand {
    fn to_string(&self) -> String {
        match self {
            Self::Nishat => "Nishat".to_string(),
            Self::JunaidJamshaid => "Junaid Jamshaid".to_string(),
            Self::Beechtree => "Beechtree".to_string(),
        }
    }
}

/// Splits the comma separated image field the admin form submits into
/// an ordered list of urls. Entries are trimmed, empty ones dropped.
pub fn parse_image_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|img| img.trim().to_string())
        .filter(|img| !img.is_empty())
        .collect()
}
