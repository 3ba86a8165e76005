use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::OptionalExtension;

use crate::models::{NewUser, User};
use crate::schema::users::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create(conn: &mut PgPoolConn, new_user: &NewUser) -> Result<User, diesel::result::Error> {
    diesel::insert_into(users)
        .values(new_user)
        .returning(User::as_returning())
        .get_result(conn)
}

pub fn find_by_email(
    conn: &mut PgPoolConn,
    address: &str,
) -> Result<Option<User>, diesel::result::Error> {
    users
        .filter(email.eq(address))
        .select(User::as_select())
        .first(conn)
        .optional()
}

pub fn find_by_id(conn: &mut PgPoolConn, user_id: i32) -> Result<Option<User>, diesel::result::Error> {
    users
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()
}
