use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// UUID v4 assigned on insert
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Not declared unique: uniqueness is a pre-check owned by the HTTP layer.
    pub username: String,

    /// Argon2id PHC string, or the temp-user sentinel
    pub password_hash: String,

    /// `true` for permanent accounts, `false` for temporary ones.
    pub logged_in: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
