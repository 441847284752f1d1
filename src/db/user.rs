use diesel::prelude::*;
use diesel_async::{AsyncPgConnection as Connection, RunQueryDsl};
use serde::{Deserialize, Serialize};

use super::schema::users;
use crate::utils::DatabaseError;

/// Mirror of a chat platform user.
#[derive(Queryable, Selectable, Identifiable, Deserialize, Serialize, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_hash: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct NewUser {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_hash: Option<String>,
}

/// Inserts the user, or overwrites the mirrored fields when already known.
pub async fn upsert_user(conn: &mut Connection, new: &NewUser) -> Result<User, DatabaseError> {
    Ok(diesel::insert_into(users::table)
        .values(new)
        .on_conflict(users::id)
        .do_update()
        .set(new)
        .returning(User::as_returning())
        .get_result(conn)
        .await?)
}
