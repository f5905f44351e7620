pub mod users;
pub mod projects;
pub mod table_stores;
pub mod table_schemas;
pub mod prep_flows;
pub mod prep_flow_params;
pub mod qc_reports;
pub mod templates;
pub mod template_input_tables;
pub mod template_prep_flows;
pub mod template_qc_reports;
pub mod viz_reports;
pub mod viz_workbooks;
pub mod viz_dashboards;
pub mod viz_dashboard_filters;
pub mod viz_dashboard_params;
