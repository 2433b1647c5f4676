use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub father_name: String,
    pub mother_name: String,

    pub faculty: String,

    #[sea_orm(unique)]
    pub roll_no: String,
    #[sea_orm(unique)]
    pub enrollment_no: String,

    pub course_year: String,

    pub total_credits_registered: i32,
    pub total_credits_earned: i32,
    pub sgpa: f64,
    pub cgpa: f64,
    /// Overall outcome, e.g. "Pass".
    pub result_overall: String,

    #[sea_orm(has_many)]
    pub subjects: HasMany<super::subject::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
