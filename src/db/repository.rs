use sqlx::SqlitePool;

use crate::models::{Course, CoursePayload};

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, trainer, organizer, start_date, end_date, course_form, course_type, \
         price, execution_type, address, target_audience, link, description, deleted \
         FROM courses WHERE deleted = 0 ORDER BY id",
    )
    .fetch_all(db)
    .await
}

pub async fn find_course(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, trainer, organizer, start_date, end_date, course_form, course_type, \
         price, execution_type, address, target_audience, link, description, deleted \
         FROM courses WHERE id = ? AND deleted = 0",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_course(db: &SqlitePool, course: CoursePayload) -> Result<Course, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO courses \
         (title, trainer, organizer, start_date, end_date, course_form, course_type, \
         price, execution_type, address, target_audience, link, description, deleted) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)",
    )
    .bind(&course.title)
    .bind(&course.trainer)
    .bind(&course.organizer)
    .bind(course.start_date.map(|date| date.to_rfc3339()))
    .bind(course.end_date.map(|date| date.to_rfc3339()))
    .bind(course.course_form.map(|form| form.as_str()))
    .bind(course.course_type.map(|kind| kind.as_str()))
    .bind(&course.price)
    .bind(course.execution_type.map(|kind| kind.as_str()))
    .bind(&course.address)
    .bind(&course.target_audience)
    .bind(&course.link)
    .bind(&course.description)
    .execute(db)
    .await?;

    find_course(db, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Replaces all mutable fields of a live course. Returns false when the id is
/// unknown or the row is soft-deleted.
pub async fn update_course(
    db: &SqlitePool,
    id: i64,
    course: CoursePayload,
) -> Result<bool, sqlx::Error> {
    let rows_affected = sqlx::query(
        "UPDATE courses \
         SET title = ?, trainer = ?, organizer = ?, start_date = ?, end_date = ?, \
         course_form = ?, course_type = ?, price = ?, execution_type = ?, address = ?, \
         target_audience = ?, link = ?, description = ? \
         WHERE id = ? AND deleted = 0",
    )
    .bind(&course.title)
    .bind(&course.trainer)
    .bind(&course.organizer)
    .bind(course.start_date.map(|date| date.to_rfc3339()))
    .bind(course.end_date.map(|date| date.to_rfc3339()))
    .bind(course.course_form.map(|form| form.as_str()))
    .bind(course.course_type.map(|kind| kind.as_str()))
    .bind(&course.price)
    .bind(course.execution_type.map(|kind| kind.as_str()))
    .bind(&course.address)
    .bind(&course.target_audience)
    .bind(&course.link)
    .bind(&course.description)
    .bind(id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(rows_affected > 0)
}

/// Soft delete. The row stays in storage; all read paths filter on the flag.
/// Deleting an unknown or already deleted id is a no-op, not an error.
pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE courses SET deleted = 1 WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}
