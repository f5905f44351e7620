use anyhow::Result;
use chrono::Utc;
use sea_orm::*;
use tracing::info;

use crate::choices::{
    Choices, DataSourceOrigin, FilterColumnName, FilterSelectionType, FilterType,
    PrepFlowParamType, PrepFlowStatus, PreProcessingScript, TableSchemaDataType, TableType,
    TemplateStatus, TemplateType,
};
use crate::database::entities::{
    prep_flow_params, prep_flows, projects, qc_reports, table_schemas, table_stores,
    template_input_tables, template_prep_flows, template_qc_reports, templates, users,
    viz_dashboard_filters, viz_dashboard_params, viz_dashboards, viz_reports, viz_workbooks,
};

pub async fn create_example_catalog(db: &DatabaseConnection) -> Result<()> {
    // First check if the example project already exists
    let existing_project = projects::Entity::find()
        .filter(projects::Column::Name.eq("Retail Insights"))
        .one(db)
        .await?;

    if existing_project.is_some() {
        info!("Example catalog already exists, skipping seed data creation");
        return Ok(());
    }

    info!("Creating example catalog: Retail Insights");

    let now = Utc::now();
    let analyst = users::ActiveModel {
        username: Set("asmith".to_string()),
        name: Set(Some("Avery Smith".to_string())),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let analyst_id = users::Entity::insert(analyst).exec(db).await?.last_insert_id;

    let reviewer = users::ActiveModel {
        username: Set("jchen".to_string()),
        name: Set(Some("Jordan Chen".to_string())),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let reviewer_id = users::Entity::insert(reviewer).exec(db).await?.last_insert_id;

    let project = projects::ActiveModel {
        name: Set("Retail Insights".to_string()),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let project_id = projects::Entity::insert(project).exec(db).await?.last_insert_id;
    info!("Created project with ID: {}", project_id);

    let table_ids = create_example_tables(db).await?;
    let flow_id = create_example_flow(db).await?;
    let qc_ids = create_example_qc_reports(db).await?;
    create_example_template(db, project_id, &table_ids, flow_id, &qc_ids, reviewer_id).await?;
    create_example_viz(db, project_id).await?;

    info!(
        "Successfully created example catalog for project {} (analyst {}, reviewer {})",
        project_id, analyst_id, reviewer_id
    );
    Ok(())
}

async fn create_example_tables(db: &DatabaseConnection) -> Result<Vec<i32>> {
    info!("Creating example table stores...");

    let now = Utc::now();
    let customer_master = table_stores::ActiveModel {
        name: Set("customer_master".to_string()),
        description: Set(Some("Clustered customer base table".to_string())),
        table_type: Set(TableType::StandardTable.value().to_string()),
        data_source_origin: Set(Some(DataSourceOrigin::Clustering.value().to_string())),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let customer_master_id = table_stores::Entity::insert(customer_master)
        .exec(db)
        .await?
        .last_insert_id;

    let weekly_sales = table_stores::ActiveModel {
        name: Set("weekly_sales".to_string()),
        description: Set(Some("Custom weekly sales extract".to_string())),
        table_type: Set(TableType::CustomTable.value().to_string()),
        data_source_origin: Set(Some(DataSourceOrigin::AnalysisModule1.value().to_string())),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let weekly_sales_id = table_stores::Entity::insert(weekly_sales)
        .exec(db)
        .await?
        .last_insert_id;

    let columns = vec![
        (customer_master_id, "customer_id", TableSchemaDataType::Int, false, false),
        (customer_master_id, "l1_segment", TableSchemaDataType::Char, false, true),
        (customer_master_id, "brand", TableSchemaDataType::Char, true, true),
        (weekly_sales_id, "week_start", TableSchemaDataType::Datetime, false, true),
        (weekly_sales_id, "revenue", TableSchemaDataType::Float, true, false),
    ];

    let columns_count = columns.len();
    let mut schema_models = Vec::new();
    for (table_store_id, column_name, data_type, nullable, is_filter_column) in columns {
        schema_models.push(table_schemas::ActiveModel {
            table_store_id: Set(table_store_id),
            column_name: Set(column_name.to_string()),
            data_type: Set(data_type.value().to_string()),
            nullable: Set(nullable),
            is_filter_column: Set(is_filter_column),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });
    }
    table_schemas::Entity::insert_many(schema_models).exec(db).await?;
    info!("Created {} schema columns", columns_count);

    Ok(vec![customer_master_id, weekly_sales_id])
}

async fn create_example_flow(db: &DatabaseConnection) -> Result<i32> {
    info!("Creating example prep flow...");

    let now = Utc::now();
    let flow = prep_flows::ActiveModel {
        name: Set("weekly-sales-prep".to_string()),
        description: Set(Some("Cleans and aggregates the weekly sales extract".to_string())),
        filepath: Set(Some("https://prep.example.com/flows/weekly-sales-prep".to_string())),
        flow_id: Set(Some("f-7731".to_string())),
        status: Set(PrepFlowStatus::Published.value().to_string()),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let flow_id = prep_flows::Entity::insert(flow).exec(db).await?.last_insert_id;

    let params = vec![
        ("week_start", PrepFlowParamType::InputParam, Some("p-101")),
        ("region", PrepFlowParamType::InputParam, Some("p-102")),
        ("row_count", PrepFlowParamType::OutputParam, Some("p-201")),
    ];

    let params_count = params.len();
    let mut param_models = Vec::new();
    for (name, param_type, flow_param_id) in params {
        param_models.push(prep_flow_params::ActiveModel {
            prep_flow_id: Set(flow_id),
            name: Set(name.to_string()),
            param_type: Set(param_type.value().to_string()),
            flow_param_id: Set(flow_param_id.map(|s| s.to_string())),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });
    }
    prep_flow_params::Entity::insert_many(param_models).exec(db).await?;
    info!("Created {} flow params", params_count);

    Ok(flow_id)
}

async fn create_example_qc_reports(db: &DatabaseConnection) -> Result<Vec<i32>> {
    info!("Creating example QC reports...");

    let now = Utc::now();
    let mut ids = Vec::new();
    for name in ["row-count-check", "null-scan"] {
        let report = qc_reports::ActiveModel {
            name: Set(name.to_string()),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        ids.push(qc_reports::Entity::insert(report).exec(db).await?.last_insert_id);
    }

    Ok(ids)
}

async fn create_example_template(
    db: &DatabaseConnection,
    project_id: i32,
    table_ids: &[i32],
    flow_id: i32,
    qc_ids: &[i32],
    reviewer_id: i32,
) -> Result<()> {
    info!("Creating example template...");

    let now = Utc::now();
    let scripts = serde_json::to_string(&vec![
        PreProcessingScript::DropEmptyRows.value(),
        PreProcessingScript::Deduplicate.value(),
    ])?;

    let template = templates::ActiveModel {
        project_id: Set(Some(project_id)),
        name: Set("Weekly Retail Template".to_string()),
        template_type: Set(TemplateType::Standard.value().to_string()),
        filepath: Set(Some("https://viz.example.com/templates/weekly-retail".to_string())),
        summary: Set(Some("Weekly retail reporting baseline".to_string())),
        status: Set(TemplateStatus::Published.value().to_string()),
        pre_processing_scripts: Set(scripts),
        master_flow_id: Set(Some(flow_id)),
        qc_approved_by: Set(Some(reviewer_id)),
        last_modified_by: Set(Some(reviewer_id)),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let template_id = templates::Entity::insert(template).exec(db).await?.last_insert_id;

    let mut input_links = Vec::new();
    for table_store_id in table_ids {
        input_links.push(template_input_tables::ActiveModel {
            template_id: Set(template_id),
            table_store_id: Set(*table_store_id),
            created_on: Set(now),
            ..Default::default()
        });
    }
    template_input_tables::Entity::insert_many(input_links).exec(db).await?;

    let flow_link = template_prep_flows::ActiveModel {
        template_id: Set(template_id),
        prep_flow_id: Set(flow_id),
        created_on: Set(now),
        ..Default::default()
    };
    template_prep_flows::Entity::insert(flow_link).exec(db).await?;

    let mut qc_links = Vec::new();
    for qc_report_id in qc_ids {
        qc_links.push(template_qc_reports::ActiveModel {
            template_id: Set(template_id),
            qc_report_id: Set(*qc_report_id),
            created_on: Set(now),
            ..Default::default()
        });
    }
    template_qc_reports::Entity::insert_many(qc_links).exec(db).await?;

    info!("Created template with ID: {}", template_id);
    Ok(())
}

async fn create_example_viz(db: &DatabaseConnection, project_id: i32) -> Result<()> {
    info!("Creating example visualization hierarchy...");

    let now = Utc::now();
    let report = viz_reports::ActiveModel {
        project_id: Set(project_id),
        name: Set("Weekly Sales".to_string()),
        url: Set(Some("https://viz.example.com/reports/weekly-sales".to_string())),
        sequence_no: Set(1),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let report_id = viz_reports::Entity::insert(report).exec(db).await?.last_insert_id;

    let workbook = viz_workbooks::ActiveModel {
        report_id: Set(report_id),
        name: Set("Sales Overview".to_string()),
        url: Set(Some("https://viz.example.com/workbooks/sales-overview".to_string())),
        sequence_no: Set(1),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let workbook_id = viz_workbooks::Entity::insert(workbook).exec(db).await?.last_insert_id;

    let filter_config = serde_json::json!({
        "source": "query_string",
        "mappings": [{ "param": "region", "filter": "L1" }]
    });

    let dashboard = viz_dashboards::ActiveModel {
        workbook_id: Set(workbook_id),
        name: Set("Regional Breakdown".to_string()),
        url: Set("https://viz.example.com/dashboards/regional-breakdown".to_string()),
        sequence_no: Set(1),
        external_filter_config: Set(Some(serde_json::to_string(&filter_config)?)),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let dashboard_id = viz_dashboards::Entity::insert(dashboard).exec(db).await?.last_insert_id;

    let filters = vec![
        ("Region", FilterColumnName::L1, FilterSelectionType::SingleSelect, 1),
        ("Category", FilterColumnName::L2, FilterSelectionType::MultiSelect, 2),
        ("Brand", FilterColumnName::Brand, FilterSelectionType::MultiSelect, 3),
    ];

    let filters_count = filters.len();
    let mut filter_models = Vec::new();
    for (display_name, column, selection, sequence_no) in filters {
        filter_models.push(viz_dashboard_filters::ActiveModel {
            dashboard_id: Set(dashboard_id),
            display_name: Set(display_name.to_string()),
            filter_column_name: Set(column.value().to_string()),
            internal_filter_name: Set(Some(format!("flt_{}", column.value().to_lowercase()))),
            filter_type: Set(FilterType::Default.value().to_string()),
            filter_selection_type: Set(selection.value().to_string()),
            sequence_no: Set(sequence_no),
            deleted: Set(false),
            created_on: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });
    }
    viz_dashboard_filters::Entity::insert_many(filter_models).exec(db).await?;
    info!("Created {} dashboard filters", filters_count);

    let param_values = serde_json::to_string(&vec!["4", "13", "52"])?;
    let param = viz_dashboard_params::ActiveModel {
        dashboard_id: Set(dashboard_id),
        internal_name: Set("prm_weeks".to_string()),
        display_name: Set("Trailing Weeks".to_string()),
        param_values: Set(param_values),
        deleted: Set(false),
        created_on: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    viz_dashboard_params::Entity::insert(param).exec(db).await?;

    info!("Created dashboard {} with filters and params", dashboard_id);
    Ok(())
}
