use crate::entities::prelude::User;
use crate::entities::user::{self, ActiveModel as UserActiveModel, Model as UserModel};
use crate::error::AppError;
use crate::login::password;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    SqlErr,
};
use uuid::Uuid;

/// Inserts a new user. The pre-checks produce specific conflict messages;
/// the unique constraints on username_lower and email close the race.
pub async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    password_hash: String,
) -> Result<UserModel, AppError> {
    let username_lower = username.to_lowercase();

    if User::find()
        .filter(user::Column::UsernameLower.eq(&username_lower))
        .one(db)
        .await?
        .is_some()
    {
        return Err(AppError::UsernameTaken(username.to_string()));
    }

    if User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?
        .is_some()
    {
        return Err(AppError::EmailTaken(email.to_string()));
    }

    let user = UserActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        username: ActiveValue::Set(username.to_string()),
        username_lower: ActiveValue::Set(username_lower),
        email: ActiveValue::Set(email.to_string()),
        password_hash: ActiveValue::Set(password_hash),
    };

    match user.insert(db).await {
        Ok(model) => Ok(model),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Err(AppError::UsernameTaken(username.to_string()))
            }
            _ => Err(AppError::Db(err)),
        },
    }
}

pub async fn find_by_username_ci(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<UserModel>, AppError> {
    Ok(User::find()
        .filter(user::Column::UsernameLower.eq(username.to_lowercase()))
        .one(db)
        .await?)
}

/// Unknown username and wrong password are indistinguishable to the caller.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    plaintext: &str,
) -> Result<UserModel, AppError> {
    let user = find_by_username_ci(db, username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify(plaintext, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

pub async fn update_password(
    db: &DatabaseConnection,
    user_id: &str,
    password_hash: String,
) -> Result<(), AppError> {
    User::update_many()
        .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await?;

    Ok(())
}

pub async fn update_email(
    db: &DatabaseConnection,
    user_id: &str,
    email: &str,
) -> Result<(), AppError> {
    if let Some(existing) = User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?
    {
        if existing.id != user_id {
            return Err(AppError::EmailTaken(email.to_string()));
        }
    }

    let result = User::update_many()
        .col_expr(user::Column::Email, Expr::value(email))
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Err(AppError::EmailTaken(email.to_string()))
            }
            _ => Err(AppError::Db(err)),
        },
    }
}
