use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub student_id: i32,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,

    pub semester: i32,
    pub code: String,
    pub name: String,

    // Obtained marks are not bounds-checked against their maxima.
    pub max_exam: i32,
    pub max_sess: i32,
    pub max_total: i32,
    pub marks_exam: i32,
    pub marks_sess: i32,
    pub marks_total: i32,
}

impl ActiveModelBehavior for ActiveModel {}
