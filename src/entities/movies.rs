use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub imdb_id: String,
    pub title: String,
    pub year: Option<i32>,
    pub score: Option<f32>,
    pub score_average: Option<f32>,
    pub category: String,
    pub tmdb_id: Option<i32>,
    pub trakt_id: Option<i32>,
    pub mal_id: Option<i32>,
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
