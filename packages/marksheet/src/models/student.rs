use sea_orm::Set;
use serde::Deserialize;

use crate::entity::subject;
use crate::error::AppError;

/// Public lookup form.
#[derive(Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub roll_no: String,
}

/// Admin login form.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Admin add/edit form.
///
/// Subject rows arrive as equal-length parallel arrays, one entry per row.
/// Numeric values stay raw strings here and are parsed in
/// [`parse_subject_rows`]; a malformed number aborts the whole request.
#[derive(Deserialize)]
pub struct StudentForm {
    pub name: String,
    pub father_name: String,
    pub mother_name: String,
    pub faculty: String,
    pub roll_no: String,
    pub enrollment_no: String,
    pub course_year: String,
    pub result_overall: String,

    #[serde(default)]
    pub total_credits_registered: String,
    #[serde(default)]
    pub total_credits_earned: String,
    #[serde(default)]
    pub sgpa: String,
    #[serde(default)]
    pub cgpa: String,

    #[serde(default)]
    pub subj_semester: Vec<String>,
    #[serde(default)]
    pub subj_code: Vec<String>,
    #[serde(default)]
    pub subj_name: Vec<String>,
    #[serde(default)]
    pub subj_max_exam: Vec<String>,
    #[serde(default)]
    pub subj_max_sess: Vec<String>,
    #[serde(default)]
    pub subj_max_total: Vec<String>,
    #[serde(default)]
    pub subj_marks_exam: Vec<String>,
    #[serde(default)]
    pub subj_marks_sess: Vec<String>,
    #[serde(default)]
    pub subj_marks_total: Vec<String>,
}

/// One parsed subject row, ready to insert under a student.
pub struct SubjectRow {
    pub semester: i32,
    pub code: String,
    pub name: String,
    pub max_exam: i32,
    pub max_sess: i32,
    pub max_total: i32,
    pub marks_exam: i32,
    pub marks_sess: i32,
    pub marks_total: i32,
}

impl SubjectRow {
    pub fn into_active_model(self, student_id: i32) -> subject::ActiveModel {
        subject::ActiveModel {
            student_id: Set(student_id),
            semester: Set(self.semester),
            code: Set(self.code),
            name: Set(self.name),
            max_exam: Set(self.max_exam),
            max_sess: Set(self.max_sess),
            max_total: Set(self.max_total),
            marks_exam: Set(self.marks_exam),
            marks_sess: Set(self.marks_sess),
            marks_total: Set(self.marks_total),
            ..Default::default()
        }
    }
}

/// Parse the parallel subject arrays into rows. The row count follows
/// `subj_code`; a row missing from any sibling array is an error.
pub fn parse_subject_rows(form: &StudentForm) -> Result<Vec<SubjectRow>, AppError> {
    let mut rows = Vec::with_capacity(form.subj_code.len());
    for i in 0..form.subj_code.len() {
        rows.push(SubjectRow {
            semester: field(&form.subj_semester, i)?.trim().parse()?,
            code: field(&form.subj_code, i)?.trim().to_string(),
            name: field(&form.subj_name, i)?.trim().to_string(),
            max_exam: field(&form.subj_max_exam, i)?.trim().parse()?,
            max_sess: field(&form.subj_max_sess, i)?.trim().parse()?,
            max_total: field(&form.subj_max_total, i)?.trim().parse()?,
            marks_exam: field(&form.subj_marks_exam, i)?.trim().parse()?,
            marks_sess: field(&form.subj_marks_sess, i)?.trim().parse()?,
            marks_total: field(&form.subj_marks_total, i)?.trim().parse()?,
        });
    }
    Ok(rows)
}

fn field(values: &[String], i: usize) -> Result<&str, AppError> {
    values
        .get(i)
        .map(String::as_str)
        .ok_or_else(|| AppError::Internal(format!("subject row {i} is incomplete")))
}

/// Cumulative fields are optional on the form; blank means zero.
pub fn parse_or_zero_i32(raw: &str) -> Result<i32, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(0)
    } else {
        Ok(trimmed.parse()?)
    }
}

pub fn parse_or_zero_f64(raw: &str) -> Result<f64, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(0.0)
    } else {
        Ok(trimmed.parse()?)
    }
}
