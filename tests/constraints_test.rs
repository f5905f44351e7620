//! Integrity rule tests
//!
//! Every write path is expected to reject bad input synchronously:
//! duplicate names, blank fields, out-of-domain choice values, relative
//! URLs, and references to missing or tombstoned rows.

use anyhow::Result;
use sea_orm::DatabaseConnection;
use tempfile::NamedTempFile;

use vizcatalog::accounts::{AccountAdapter, SocialAccountAdapter};
use vizcatalog::config::AccountConfig;
use vizcatalog::database::init_database;
use vizcatalog::services::{
    CatalogError, CreateFlowRequest, CreateReportRequest, CreateTableRequest,
    CreateTemplateRequest, FlowService, ProjectService, TableService, TemplateService,
    UserService, VizService,
};

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

fn table_request(name: &str) -> CreateTableRequest {
    CreateTableRequest {
        name: name.to_string(),
        description: None,
        table_type: "STANDARD_TABLE".to_string(),
        data_source_origin: None,
    }
}

#[tokio::test]
async fn test_duplicate_project_names_rejected() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let service = ProjectService::new(db);

    let sales = service.create_project("Sales").await?;

    let err = service.create_project("Sales").await.unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { .. }));
    assert_eq!(err.to_string(), "projects.name 'Sales' already exists");
    assert_eq!(err.error_code(), "CONFLICT");

    // Names are trimmed before the uniqueness check
    let err = service.create_project("  Sales  ").await.unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { .. }));

    // Renaming onto a taken name fails; renaming onto your own name is fine
    let ops = service.create_project("Ops").await?;
    let err = service.rename_project(ops.id, "Sales").await.unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { .. }));
    service.rename_project(sales.id, "Sales").await?;

    Ok(())
}

#[tokio::test]
async fn test_unique_names_span_tombstones() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let users = UserService::new(db.clone());
    let user = users.create_user("asmith", None).await?;
    users.delete_user(user.id).await?;
    let err = users.create_user("asmith", None).await.unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { .. }));

    let projects = ProjectService::new(db.clone());
    let project = projects.create_project("Retail").await?;
    projects.delete_project(project.id).await?;
    let err = projects.create_project("Retail").await.unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { .. }));

    let templates = TemplateService::new(db);
    let report = templates.create_qc_report("null-scan").await?;
    templates.delete_qc_report(report.id).await?;
    let err = templates.create_qc_report("null-scan").await.unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { .. }));

    Ok(())
}

#[tokio::test]
async fn test_blank_fields_rejected() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let err = ProjectService::new(db.clone())
        .create_project("   ")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingField { .. }));
    assert_eq!(err.to_string(), "projects.name must not be blank");

    let err = UserService::new(db.clone())
        .create_user("", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingField { .. }));

    let err = TableService::new(db.clone())
        .create_table(table_request("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingField { .. }));

    let err = TemplateService::new(db)
        .create_template(template_request("", None))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingField { .. }));

    Ok(())
}

#[tokio::test]
async fn test_choice_values_validated() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let err = TableService::new(db.clone())
        .create_table(CreateTableRequest {
            table_type: "BOGUS".to_string(),
            ..table_request("t")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidChoice { .. }));
    assert_eq!(err.to_string(), "'BOGUS' is not a valid table type");
    assert_eq!(err.error_code(), "VALIDATION_FAILED");

    // Tombstoning is not a status, so DELETED stays out of the domain
    let err = FlowService::new(db.clone())
        .create_flow(CreateFlowRequest {
            name: "flow".to_string(),
            description: None,
            filepath: None,
            flow_id: None,
            status: Some("DELETED".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidChoice { .. }));

    // Script lists are checked element by element against the allow list
    let err = TemplateService::new(db)
        .create_template(CreateTemplateRequest {
            pre_processing_scripts: vec![
                "DROP_EMPTY_ROWS".to_string(),
                "rm -rf /".to_string(),
            ],
            ..template_request("t", None)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidChoice { .. }));

    Ok(())
}

#[tokio::test]
async fn test_urls_must_be_absolute() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let err = FlowService::new(db.clone())
        .create_flow(CreateFlowRequest {
            name: "flow".to_string(),
            description: None,
            filepath: Some("/flows/weekly".to_string()),
            flow_id: None,
            status: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidUrl { .. }));
    assert_eq!(err.error_code(), "VALIDATION_FAILED");

    let project = ProjectService::new(db.clone()).create_project("Retail").await?;
    let err = VizService::new(db)
        .create_report(CreateReportRequest {
            project_id: project.id,
            name: "Weekly Sales".to_string(),
            url: Some("not a url".to_string()),
            sequence_no: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidUrl { .. }));

    Ok(())
}

#[tokio::test]
async fn test_references_must_be_live() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let err = TemplateService::new(db.clone())
        .create_template(template_request("t", Some(999)))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingReference { .. }));
    assert_eq!(err.to_string(), "templates.project_id references missing row 999");

    let err = TemplateService::new(db.clone())
        .create_template(CreateTemplateRequest {
            input_table_ids: vec![777],
            ..template_request("t", None)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingReference { .. }));

    let err = VizService::new(db.clone())
        .create_report(CreateReportRequest {
            project_id: 9999,
            name: "r".to_string(),
            url: None,
            sequence_no: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingReference { .. }));

    let err = TableService::new(db.clone())
        .add_column(404, "col", "CHAR", false, false)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingReference { .. }));

    // A tombstoned row counts as missing
    let projects = ProjectService::new(db.clone());
    let project = projects.create_project("Gone").await?;
    projects.delete_project(project.id).await?;
    let err = VizService::new(db.clone())
        .create_report(CreateReportRequest {
            project_id: project.id,
            name: "r".to_string(),
            url: None,
            sequence_no: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingReference { .. }));

    let users = UserService::new(db.clone());
    let user = users.create_user("ghost", None).await?;
    users.delete_user(user.id).await?;
    let err = TemplateService::new(db)
        .create_template(CreateTemplateRequest {
            last_modified_by: Some(user.id),
            ..template_request("t", None)
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingReference { .. }));

    Ok(())
}

#[tokio::test]
async fn test_table_delete_blocked_while_referenced() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let tables = TableService::new(db.clone());
    let templates = TemplateService::new(db.clone());

    let table = tables.create_table(table_request("customer_master")).await?;
    let template = templates
        .create_template(CreateTemplateRequest {
            input_table_ids: vec![table.id],
            ..template_request("Linked", None)
        })
        .await?;

    let err = tables.delete_table(table.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::StillReferenced { count: 1, .. }));
    assert!(err.is_conflict());
    assert_eq!(
        err.to_string(),
        format!(
            "table_stores {} is still referenced by 1 template_input_tables row(s)",
            table.id
        )
    );

    // After the template lets go of the table, deletion goes through
    templates.set_input_tables(template.id, &[]).await?;
    tables.delete_table(table.id).await?;

    let err = tables.get_table(table.id).await.unwrap_err();
    assert!(err.is_not_found());

    Ok(())
}

#[tokio::test]
async fn test_registration_policy_gates_signup() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;
    let users = UserService::new(db);

    let closed = AccountConfig {
        allow_registration: false,
    };
    let err = users
        .register(&AccountAdapter::new(&closed), "asmith", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::RegistrationClosed));
    assert_eq!(err.error_code(), "REGISTRATION_CLOSED");

    // Social sign-up consults the same flag
    let err = users
        .register(&SocialAccountAdapter::new(&closed), "asmith", None)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::RegistrationClosed));

    let open = AccountConfig {
        allow_registration: true,
    };
    let user = users
        .register(&AccountAdapter::new(&open), "asmith", Some("Avery Smith"))
        .await?;
    assert_eq!(user.username, "asmith");
    assert_eq!(user.name, Some("Avery Smith".to_string()));

    let found = users.find_by_username("asmith").await?;
    assert!(found.is_some());

    Ok(())
}
