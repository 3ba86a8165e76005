use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::models::{EsgResponse, NewEsgResponse};
use crate::schema::esg_responses::dsl::*;

pub type PgPoolConn = PooledConnection<ConnectionManager<PgConnection>>;

type OwnedRows = crate::schema::esg_responses::BoxedQuery<'static, Pg>;

/// Insert every row in one transaction; either all rows are stored or none.
pub fn create_batch(
    conn: &mut PgPoolConn,
    rows: &[NewEsgResponse],
) -> Result<Vec<EsgResponse>, diesel::result::Error> {
    conn.transaction(|conn| {
        rows.iter()
            .map(|row| {
                diesel::insert_into(esg_responses)
                    .values(row)
                    .returning(EsgResponse::as_returning())
                    .get_result(conn)
            })
            .collect()
    })
}

/// Rows owned by `owner_id`, newest first; ties on `created_at` go to the higher id.
fn owned_by(owner_id: i32) -> OwnedRows {
    esg_responses
        .filter(user_id.eq(owner_id))
        .order((created_at.desc(), id.desc()))
        .into_boxed()
}

/// All rows owned by `owner_id`, most recent first.
pub fn list_by_owner(
    conn: &mut PgPoolConn,
    owner_id: i32,
) -> Result<Vec<EsgResponse>, diesel::result::Error> {
    owned_by(owner_id)
        .select(EsgResponse::as_select())
        .load(conn)
}
