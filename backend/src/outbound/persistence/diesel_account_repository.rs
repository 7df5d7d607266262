//! PostgreSQL-backed profiles and role assignments.
//!
//! Accounts themselves live with the identity provider; this adapter only
//! holds the storefront's side of each user.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{AccountRepository, RepositoryError};
use crate::domain::{Profile, Role, UserId};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{NewRoleRow, ProfileRow, RoleRow};
use super::pool::DbPool;
use super::schema::{carts, profiles, reviews, user_roles};

/// Diesel-backed implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = profiles::table
            .find(user_id.as_uuid())
            .select(ProfileRow::as_select())
            .first::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Profile::from))
    }

    async fn save_profile(&self, profile: &Profile) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ProfileRow::from(profile);

        diesel::insert_into(profiles::table)
            .values(&row)
            .on_conflict(profiles::user_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn roles_for(&self, user_id: &UserId) -> Result<Vec<Role>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let raw: Vec<String> = user_roles::table
            .filter(user_roles::user_id.eq(user_id.as_uuid()))
            .order_by(user_roles::role.asc())
            .select(user_roles::role)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        raw.iter()
            .map(|role| {
                role.parse::<Role>()
                    .map_err(|err| corrupt_row("user_roles", &err))
            })
            .collect()
    }

    async fn all_roles(&self) -> Result<Vec<(UserId, Role)>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RoleRow> = user_roles::table
            .select(RoleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(<(UserId, Role)>::try_from).collect()
    }

    async fn set_role(&self, user_id: &UserId, role: Role) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_uuid = *user_id.as_uuid();

        // A user holds exactly one role; swap it atomically.
        conn.transaction(|conn| {
            async move {
                diesel::delete(user_roles::table.filter(user_roles::user_id.eq(user_uuid)))
                    .execute(conn)
                    .await?;
                diesel::insert_into(user_roles::table)
                    .values(&NewRoleRow {
                        user_id: user_uuid,
                        role: role.as_str(),
                    })
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete_account_data(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_uuid = *user_id.as_uuid();

        conn.transaction(|conn| {
            async move {
                diesel::delete(reviews::table.filter(reviews::user_id.eq(user_uuid)))
                    .execute(conn)
                    .await?;
                diesel::delete(carts::table.find(user_uuid))
                    .execute(conn)
                    .await?;
                diesel::delete(user_roles::table.filter(user_roles::user_id.eq(user_uuid)))
                    .execute(conn)
                    .await?;
                diesel::delete(profiles::table.find(user_uuid))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
