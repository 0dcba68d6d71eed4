use crate::entities::prelude::{ListEntry, Platform, UserPlatform};
use crate::entities::user_platform::ActiveModel as UserPlatformActiveModel;
use crate::entities::{list_entry, platform, user_platform};
use crate::error::AppError;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Func;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, SqlErr,
    TransactionTrait,
};

pub async fn all_platforms(db: &DatabaseConnection) -> Result<Vec<platform::Model>, AppError> {
    Ok(Platform::find()
        .order_by_asc(platform::Column::Name)
        .all(db)
        .await?)
}

/// Case-insensitive lookup against the canonical platform table.
pub async fn find_by_name_ci(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<platform::Model>, AppError> {
    Ok(Platform::find()
        .filter(Expr::expr(Func::lower(Expr::col(platform::Column::Name))).eq(name.to_lowercase()))
        .one(db)
        .await?)
}

pub async fn platforms_of_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<platform::Model>, AppError> {
    Ok(Platform::find()
        .inner_join(UserPlatform)
        .filter(user_platform::Column::UserId.eq(user_id))
        .order_by_asc(platform::Column::Name)
        .all(db)
        .await?)
}

pub async fn add_platform(
    db: &DatabaseConnection,
    user_id: &str,
    platform_name: &str,
) -> Result<platform::Model, AppError> {
    let platform = find_by_name_ci(db, platform_name)
        .await?
        .ok_or_else(|| AppError::UnknownPlatform(platform_name.to_string()))?;

    if UserPlatform::find_by_id((user_id.to_string(), platform.id))
        .one(db)
        .await?
        .is_some()
    {
        return Err(AppError::AlreadyOwned(platform.name));
    }

    let ownership = UserPlatformActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        platform_id: ActiveValue::Set(platform.id),
    };

    match UserPlatform::insert(ownership).exec(db).await {
        Ok(_) => Ok(platform),
        Err(err) => match err.sql_err() {
            // two tabs adding the same platform, the second one loses
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Err(AppError::AlreadyOwned(platform.name))
            }
            _ => Err(AppError::Db(err)),
        },
    }
}

/// Drops the ownership row and every list entry this user has on the
/// platform, atomically. Other users' entries are untouched.
pub async fn remove_platform(
    db: &DatabaseConnection,
    user_id: &str,
    platform_name: &str,
) -> Result<(), AppError> {
    let platform = find_by_name_ci(db, platform_name)
        .await?
        .ok_or_else(|| AppError::UnknownPlatform(platform_name.to_string()))?;

    if UserPlatform::find_by_id((user_id.to_string(), platform.id))
        .one(db)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "You do not own the platform {}!",
            platform.name
        )));
    }

    let txn = db.begin().await?;

    ListEntry::delete_many()
        .filter(
            list_entry::Column::UserId
                .eq(user_id)
                .and(list_entry::Column::PlatformId.eq(platform.id)),
        )
        .exec(&txn)
        .await?;

    UserPlatform::delete_many()
        .filter(
            user_platform::Column::UserId
                .eq(user_id)
                .and(user_platform::Column::PlatformId.eq(platform.id)),
        )
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(())
}
