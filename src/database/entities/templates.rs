use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: Option<i32>,
    pub name: String,
    /// TemplateType choice value
    pub template_type: String,
    pub filepath: Option<String>,
    pub summary: Option<String>,
    /// TemplateStatus choice value
    pub status: String,
    /// JSON array of PreProcessingScript choice values
    pub pre_processing_scripts: String,
    pub master_flow_id: Option<i32>,
    pub qc_approved_by: Option<i32>,
    pub last_modified_by: Option<i32>,
    pub deleted: bool,
    pub created_on: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

impl Model {
    /// Parse the stored pre-processing script list.
    pub fn scripts(&self) -> Result<Vec<String>, serde_json::Error> {
        serde_json::from_str(&self.pre_processing_scripts)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Projects,
    #[sea_orm(
        belongs_to = "super::prep_flows::Entity",
        from = "Column::MasterFlowId",
        to = "super::prep_flows::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    MasterFlow,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::QcApprovedBy",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    QcApprovedByUser,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::LastModifiedBy",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    LastModifiedByUser,
    #[sea_orm(has_many = "super::template_input_tables::Entity")]
    TemplateInputTables,
    #[sea_orm(has_many = "super::template_prep_flows::Entity")]
    TemplatePrepFlows,
    #[sea_orm(has_many = "super::template_qc_reports::Entity")]
    TemplateQcReports,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::template_input_tables::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateInputTables.def()
    }
}

impl Related<super::template_prep_flows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplatePrepFlows.def()
    }
}

impl Related<super::template_qc_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateQcReports.def()
    }
}

impl Related<super::table_stores::Entity> for Entity {
    fn to() -> RelationDef {
        super::template_input_tables::Relation::TableStores.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::template_input_tables::Relation::Templates.def().rev())
    }
}

// Related<prep_flows> routes through the join table; the master-flow
// reference is resolved by id instead.
impl Related<super::prep_flows::Entity> for Entity {
    fn to() -> RelationDef {
        super::template_prep_flows::Relation::PrepFlows.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::template_prep_flows::Relation::Templates.def().rev())
    }
}

impl Related<super::qc_reports::Entity> for Entity {
    fn to() -> RelationDef {
        super::template_qc_reports::Relation::QcReports.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::template_qc_reports::Relation::Templates.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
