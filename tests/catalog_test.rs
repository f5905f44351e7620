//! Catalog schema tests
//!
//! Tests for database migrations, entity operations, and the foreign-key
//! behavior baked into the schema.

use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, Set,
};
use tempfile::NamedTempFile;

use vizcatalog::database::entities::{
    prep_flow_params, prep_flows, projects, qc_reports, table_schemas, table_stores,
    template_input_tables, template_prep_flows, template_qc_reports, templates, users,
    viz_dashboard_filters, viz_dashboard_params, viz_dashboards, viz_reports, viz_workbooks,
};
use vizcatalog::database::{get_database_url, init_database};
use vizcatalog::services::{
    CreateDashboardParamRequest, CreateDashboardRequest, CreateFlowRequest, CreateReportRequest,
    CreateTableRequest, CreateTemplateRequest, CreateWorkbookRequest, FlowService, ProjectService,
    TableService, TemplateService, UserService, VizService,
};

/// Create a test database connection with migrations applied
async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db = init_database(&temp_file.path().display().to_string()).await?;
    Ok((db, temp_file))
}

fn template_request(name: &str, project_id: Option<i32>) -> CreateTemplateRequest {
    CreateTemplateRequest {
        project_id,
        name: name.to_string(),
        template_type: "STANDARD".to_string(),
        filepath: None,
        summary: None,
        status: None,
        pre_processing_scripts: vec![],
        master_flow_id: None,
        input_table_ids: vec![],
        prep_flow_ids: vec![],
        last_modified_by: None,
    }
}

#[tokio::test]
async fn test_database_migrations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Verify every table exists and matches its entity by querying it
    assert_eq!(users::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(projects::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(table_stores::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(table_schemas::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(prep_flows::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(prep_flow_params::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(qc_reports::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(templates::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(template_input_tables::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(template_prep_flows::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(template_qc_reports::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(viz_reports::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(viz_workbooks::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(viz_dashboards::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(viz_dashboard_filters::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(viz_dashboard_params::Entity::find().all(&db).await?.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_project_crud_operations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Create project
    let now = Utc::now();
    let new_project = projects::ActiveModel {
        name: Set("Test Project".to_string()),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let project = new_project.insert(&db).await?;
    assert_eq!(project.name, "Test Project");
    assert!(!project.deleted);

    // Read project
    let found_project = projects::Entity::find_by_id(project.id)
        .one(&db)
        .await?
        .expect("Project should exist");

    assert_eq!(found_project.id, project.id);
    assert_eq!(found_project.name, "Test Project");

    // Update project
    let mut project_update: projects::ActiveModel = found_project.into();
    project_update.name = Set("Updated Test Project".to_string());

    let updated_project = project_update.update(&db).await?;
    assert_eq!(updated_project.name, "Updated Test Project");

    // Hard delete project
    projects::Entity::delete_by_id(updated_project.id)
        .exec(&db)
        .await?;

    let deleted_project = projects::Entity::find_by_id(updated_project.id)
        .one(&db)
        .await?;

    assert!(deleted_project.is_none());

    Ok(())
}

#[tokio::test]
async fn test_template_links_and_scripts() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let project = ProjectService::new(db.clone())
        .create_project("Retail")
        .await?;
    let reviewer = UserService::new(db.clone())
        .create_user("jchen", Some("Jordan Chen"))
        .await?;
    let table = TableService::new(db.clone())
        .create_table(CreateTableRequest {
            name: "weekly_sales".to_string(),
            description: None,
            table_type: "CUSTOM_TABLE".to_string(),
            data_source_origin: Some("ANALYSIS_MODULE_1".to_string()),
        })
        .await?;
    let flow = FlowService::new(db.clone())
        .create_flow(CreateFlowRequest {
            name: "weekly-sales-prep".to_string(),
            description: None,
            filepath: None,
            flow_id: None,
            status: Some("PUBLISHED".to_string()),
        })
        .await?;

    let template_service = TemplateService::new(db.clone());
    let qc_report = template_service.create_qc_report("row-count-check").await?;

    let template = template_service
        .create_template(CreateTemplateRequest {
            master_flow_id: Some(flow.id),
            pre_processing_scripts: vec![
                "DROP_EMPTY_ROWS".to_string(),
                "DEDUPLICATE".to_string(),
            ],
            input_table_ids: vec![table.id],
            prep_flow_ids: vec![flow.id],
            ..template_request("Weekly Retail Template", Some(project.id))
        })
        .await?;

    let template = template_service
        .approve_qc(template.id, reviewer.id, &[qc_report.id])
        .await?;

    // The stored script list comes back in canonical form
    assert_eq!(
        template.scripts()?,
        vec!["DROP_EMPTY_ROWS".to_string(), "DEDUPLICATE".to_string()]
    );
    assert_eq!(template.qc_approved_by, Some(reviewer.id));

    // Link rows exist for all three join tables
    let input_links = template_input_tables::Entity::find()
        .filter(template_input_tables::Column::TemplateId.eq(template.id))
        .count(&db)
        .await?;
    assert_eq!(input_links, 1);

    let flow_links = template_prep_flows::Entity::find()
        .filter(template_prep_flows::Column::TemplateId.eq(template.id))
        .count(&db)
        .await?;
    assert_eq!(flow_links, 1);

    let qc_links = template_qc_reports::Entity::find()
        .filter(template_qc_reports::Column::TemplateId.eq(template.id))
        .count(&db)
        .await?;
    assert_eq!(qc_links, 1);

    // The join tables drive the many-to-many relations
    let linked_tables = template.find_related(table_stores::Entity).all(&db).await?;
    assert_eq!(linked_tables.len(), 1);
    assert_eq!(linked_tables[0].name, "weekly_sales");

    let linked_flows = template.find_related(prep_flows::Entity).all(&db).await?;
    assert_eq!(linked_flows.len(), 1);

    let linked_qc = template.find_related(qc_reports::Entity).all(&db).await?;
    assert_eq!(linked_qc.len(), 1);
    assert_eq!(linked_qc[0].name, "row-count-check");

    Ok(())
}

#[tokio::test]
async fn test_dashboard_json_round_trip() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let project = ProjectService::new(db.clone())
        .create_project("Retail")
        .await?;
    let viz = VizService::new(db.clone());

    let report = viz
        .create_report(CreateReportRequest {
            project_id: project.id,
            name: "Weekly Sales".to_string(),
            url: Some("https://viz.example.com/reports/weekly-sales".to_string()),
            sequence_no: Some(1),
        })
        .await?;
    let workbook = viz
        .create_workbook(CreateWorkbookRequest {
            report_id: report.id,
            name: "Sales Overview".to_string(),
            url: None,
            sequence_no: None,
        })
        .await?;

    let filter_config = serde_json::json!({
        "source": "query_string",
        "mappings": [{ "param": "region", "filter": "L1" }]
    });
    let dashboard = viz
        .create_dashboard(CreateDashboardRequest {
            workbook_id: workbook.id,
            name: "Regional Breakdown".to_string(),
            url: "https://viz.example.com/dashboards/regional-breakdown".to_string(),
            sequence_no: None,
            external_filter_config: Some(filter_config.clone()),
        })
        .await?;

    assert_eq!(dashboard.filter_config()?, Some(filter_config));

    let param = viz
        .create_param(CreateDashboardParamRequest {
            dashboard_id: dashboard.id,
            internal_name: "prm_weeks".to_string(),
            display_name: "Trailing Weeks".to_string(),
            param_values: vec!["4".to_string(), "13".to_string(), "52".to_string()],
        })
        .await?;

    assert_eq!(
        param.values()?,
        vec!["4".to_string(), "13".to_string(), "52".to_string()]
    );

    // A dashboard without a config reads back as None
    let bare = viz
        .create_dashboard(CreateDashboardRequest {
            workbook_id: workbook.id,
            name: "Bare".to_string(),
            url: "https://viz.example.com/dashboards/bare".to_string(),
            sequence_no: None,
            external_filter_config: None,
        })
        .await?;
    assert_eq!(bare.filter_config()?, None);

    Ok(())
}

#[tokio::test]
async fn test_hard_delete_follows_schema_rules() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let project = ProjectService::new(db.clone())
        .create_project("Doomed")
        .await?;
    let template = TemplateService::new(db.clone())
        .create_template(template_request("Survivor", Some(project.id)))
        .await?;

    let viz = VizService::new(db.clone());
    let report = viz
        .create_report(CreateReportRequest {
            project_id: project.id,
            name: "Weekly Sales".to_string(),
            url: None,
            sequence_no: None,
        })
        .await?;
    let workbook = viz
        .create_workbook(CreateWorkbookRequest {
            report_id: report.id,
            name: "Overview".to_string(),
            url: None,
            sequence_no: None,
        })
        .await?;
    let dashboard = viz
        .create_dashboard(CreateDashboardRequest {
            workbook_id: workbook.id,
            name: "Breakdown".to_string(),
            url: "https://viz.example.com/dashboards/breakdown".to_string(),
            sequence_no: None,
            external_filter_config: None,
        })
        .await?;
    viz.create_param(CreateDashboardParamRequest {
        dashboard_id: dashboard.id,
        internal_name: "prm_weeks".to_string(),
        display_name: "Weeks".to_string(),
        param_values: vec![],
    })
    .await?;

    // Hard-deleting the project row cascades down the whole viz chain
    projects::Entity::delete_by_id(project.id).exec(&db).await?;

    assert!(viz_reports::Entity::find_by_id(report.id)
        .one(&db)
        .await?
        .is_none());
    assert!(viz_workbooks::Entity::find_by_id(workbook.id)
        .one(&db)
        .await?
        .is_none());
    assert!(viz_dashboards::Entity::find_by_id(dashboard.id)
        .one(&db)
        .await?
        .is_none());
    let params = viz_dashboard_params::Entity::find()
        .filter(viz_dashboard_params::Column::DashboardId.eq(dashboard.id))
        .count(&db)
        .await?;
    assert_eq!(params, 0);

    // Templates are kept, with the project reference nulled out
    let survivor = templates::Entity::find_by_id(template.id)
        .one(&db)
        .await?
        .expect("template should survive");
    assert_eq!(survivor.project_id, None);

    Ok(())
}

#[tokio::test]
async fn test_linked_table_store_resists_hard_delete() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let table = TableService::new(db.clone())
        .create_table(CreateTableRequest {
            name: "customer_master".to_string(),
            description: None,
            table_type: "STANDARD_TABLE".to_string(),
            data_source_origin: None,
        })
        .await?;
    let template = TemplateService::new(db.clone())
        .create_template(CreateTemplateRequest {
            input_table_ids: vec![table.id],
            ..template_request("Linked", None)
        })
        .await?;

    // The link row blocks a hard delete of the table store
    let blocked = table_stores::Entity::delete_by_id(table.id).exec(&db).await;
    assert!(blocked.is_err());

    template_input_tables::Entity::delete_many()
        .filter(template_input_tables::Column::TemplateId.eq(template.id))
        .exec(&db)
        .await?;

    table_stores::Entity::delete_by_id(table.id).exec(&db).await?;
    assert!(table_stores::Entity::find_by_id(table.id)
        .one(&db)
        .await?
        .is_none());

    Ok(())
}

#[tokio::test]
async fn test_init_database_creates_missing_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fresh.db");

    let db = init_database(&path.display().to_string()).await?;
    assert_eq!(projects::Entity::find().all(&db).await?.len(), 0);
    assert!(path.exists());

    Ok(())
}

#[test]
fn test_database_url_forms() {
    assert_eq!(get_database_url(Some(":memory:")), "sqlite::memory:");
    assert_eq!(
        get_database_url(Some("catalog.db")),
        "sqlite:catalog.db?mode=rwc"
    );
    assert_eq!(get_database_url(None), "sqlite:vizcatalog.db?mode=rwc");
}
