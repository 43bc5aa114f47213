//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, first_name, middle_name, last_name, email, phone, \
                        gender, dob, country_code, state_code, city_name, role_id, \
                        is_allowed, password";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.user_id)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.gender)
            .bind(input.dob)
            .bind(&input.country_code)
            .bind(&input.state_code)
            .bind(&input.city_name)
            .bind(&input.role_id)
            .bind(input.is_allowed)
            .bind(&input.password)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, user_id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE user_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY user_id ASC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `user_id` exists.
    pub async fn update(
        pool: &PgPool,
        user_id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                middle_name = COALESCE($3, middle_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                gender = COALESCE($7, gender),
                dob = COALESCE($8, dob),
                country_code = COALESCE($9, country_code),
                state_code = COALESCE($10, state_code),
                city_name = COALESCE($11, city_name),
                role_id = COALESCE($12, role_id),
                is_allowed = COALESCE($13, is_allowed)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(user_id)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.gender)
            .bind(input.dob)
            .bind(&input.country_code)
            .bind(&input.state_code)
            .bind(&input.city_name)
            .bind(&input.role_id)
            .bind(input.is_allowed)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's stored password. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        user_id: &str,
        password: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(password)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a user. Returns `true` if the row was removed.
    pub async fn delete(pool: &PgPool, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
