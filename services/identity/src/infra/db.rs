use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use cuenta_identity_schema::profiles;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::Profile;
use crate::error::IdentityError;

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn create(&self, profile: &Profile) -> Result<(), IdentityError> {
        profiles::ActiveModel {
            id: Set(profile.id),
            subject_id: Set(profile.subject_id.clone()),
            email: Set(profile.email.clone()),
            first_name: Set(profile.first_name.clone()),
            last_name: Set(profile.last_name.clone()),
            born_date: Set(profile.born_date),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create profile")?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, IdentityError> {
        let model = profiles::Entity::find()
            .filter(profiles::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find profile by email")?;
        Ok(model.map(profile_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, IdentityError> {
        let model = profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, IdentityError> {
        let result = profiles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete profile")?;
        Ok(result.rows_affected > 0)
    }
}

fn profile_from_model(model: profiles::Model) -> Profile {
    Profile {
        id: model.id,
        subject_id: model.subject_id,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        born_date: model.born_date,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
