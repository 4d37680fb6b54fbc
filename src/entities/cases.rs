use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub case_number: String,

    pub court_name: Option<String>,

    pub case_title: Option<String>,

    pub case_type: Option<String>,

    pub client_id: i32,

    pub opponent_name: Option<String>,

    pub opponent_advocate: Option<String>,

    pub filing_date: Option<Date>,

    pub current_stage: Option<String>,

    pub next_hearing_date: Option<Date>,

    /// "Active" or "Closed"; stored as text so substring search
    /// treats it like any other column.
    pub status: String,

    pub notes: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Clients,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
