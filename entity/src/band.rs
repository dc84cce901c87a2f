use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub genre: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub formed_year: Option<i32>,
    pub created_at: Option<TimeDateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::musician::Entity")]
    Musician,
    #[sea_orm(has_many = "super::show_band::Entity")]
    ShowBand,
}

impl Related<super::musician::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Musician.def()
    }
}

impl Related<super::show_band::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShowBand.def()
    }
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        super::show_band::Relation::Show.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::show_band::Relation::Band.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
