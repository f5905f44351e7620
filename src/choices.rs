//! Closed string domains for the catalog's choice-valued columns.
//!
//! Choice columns are stored as plain strings; every write goes through
//! [`Choices::from_value`] so that only members of the domain reach the
//! database. `choices()` yields the (value, label) pairs a host UI needs to
//! populate pickers.

use std::fmt;

pub trait Choices: Copy + Sized + 'static {
    /// Domain name used in validation errors.
    const DOMAIN: &'static str;

    fn variants() -> &'static [Self];

    /// Stored (database/wire) value.
    fn value(self) -> &'static str;

    /// Display label.
    fn label(self) -> &'static str;

    /// (value, label) pairs in declaration order.
    fn choices() -> Vec<(&'static str, &'static str)> {
        Self::variants().iter().map(|v| (v.value(), v.label())).collect()
    }

    /// Membership test; `None` for anything outside the domain.
    fn from_value(value: &str) -> Option<Self> {
        Self::variants().iter().copied().find(|v| v.value() == value)
    }
}

macro_rules! choices {
    ($(#[$meta:meta])* $name:ident ($domain:literal) { $($variant:ident => $value:literal, $label:literal;)+ }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl Choices for $name {
            const DOMAIN: &'static str = $domain;

            fn variants() -> &'static [Self] {
                &[$(Self::$variant,)+]
            }

            fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }
    };
}

choices! {
    /// Shape of a source table registered in the catalog.
    TableType ("table type") {
        StandardTable => "STANDARD_TABLE", "Standard table";
        CustomTable => "CUSTOM_TABLE", "Custom table";
    }
}

choices! {
    /// Upstream system a table store was produced by.
    DataSourceOrigin ("data source origin") {
        Clustering => "CLUSTERING", "Clustering";
        AnalysisModule1 => "ANALYSIS_MODULE_1", "Analysis module 1";
        AnalysisModule2 => "ANALYSIS_MODULE_2", "Analysis module 2";
    }
}

choices! {
    /// Column type of a table-schema row.
    TableSchemaDataType ("table schema data type") {
        Char => "CHAR", "Char";
        Int => "INT", "Int";
        Float => "FLOAT", "Float";
        Datetime => "DATETIME", "Datetime";
    }
}

choices! {
    /// Lifecycle of a prep flow. Deletion is a store-level tombstone, not a
    /// status value.
    PrepFlowStatus ("prep flow status") {
        Draft => "DRAFT", "Draft";
        Published => "PUBLISHED", "Published";
        Qc => "QC", "QC";
        Archived => "ARCHIVED", "Archived";
    }
}

choices! {
    /// Lifecycle of a template.
    TemplateStatus ("template status") {
        Draft => "DRAFT", "Draft";
        Published => "PUBLISHED", "Published";
        Qc => "QC", "QC";
        Archived => "ARCHIVED", "Archived";
    }
}

choices! {
    /// Direction of a prep-flow parameter.
    PrepFlowParamType ("prep flow parameter type") {
        InputParam => "INPUT_PARAM", "Input parameter";
        OutputParam => "OUTPUT_PARAM", "Output parameter";
    }
}

choices! {
    /// Whether a template is one of ours or user-authored.
    TemplateType ("template type") {
        Standard => "STANDARD", "Standard";
        Custom => "CUSTOM", "Custom";
    }
}

choices! {
    /// Allow-listed scripts a template may run before refresh.
    PreProcessingScript ("pre-processing script") {
        DropEmptyRows => "DROP_EMPTY_ROWS", "Drop empty rows";
        NormalizeHeaders => "NORMALIZE_HEADERS", "Normalize headers";
        RecodeNulls => "RECODE_NULLS", "Recode nulls";
        Deduplicate => "DEDUPLICATE", "Deduplicate";
    }
}

choices! {
    /// Source column a dashboard filter is wired to.
    FilterColumnName ("filter column name") {
        L1 => "L1", "L1";
        L2 => "L2", "L2";
        Brand => "BRAND", "Brand";
        PriceRange => "PRICE_RANGE", "Price range";
    }
}

choices! {
    /// Whether a filter is stock or hand-built.
    FilterType ("filter type") {
        Default => "DEFAULT", "Default";
        Custom => "CUSTOM", "Custom";
    }
}

choices! {
    /// Selection widget a filter renders as.
    FilterSelectionType ("filter selection type") {
        SingleSelect => "SINGLE_SELECT", "Single select";
        MultiSelect => "MULTI_SELECT", "Multi select";
        DateRange => "DATE_RANGE", "Date range";
        Range => "RANGE", "Range";
    }
}
