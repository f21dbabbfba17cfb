//! Table-name to module lookup used to group tables for presentation.

use crate::model::OTHER_MODULE;

/// Ordered `module -> tables` taxonomy.
///
/// The catalog is handed to the parser and the renderers; swap it out to
/// classify another schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleCatalog {
    modules: Vec<(String, Vec<String>)>,
}

impl ModuleCatalog {
    pub fn new<M, T>(modules: impl IntoIterator<Item = (M, Vec<T>)>) -> Self
    where
        M: Into<String>,
        T: Into<String>,
    {
        Self {
            modules: modules
                .into_iter()
                .map(|(m, tables)| (m.into(), tables.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Module owning `table`; the first listing wins, unknown tables are `"Other"`.
    pub fn resolve(&self, table: &str) -> &str {
        self.modules
            .iter()
            .find(|(_, tables)| tables.iter().any(|t| t == table))
            .map(|(module, _)| module.as_str())
            .unwrap_or(OTHER_MODULE)
    }

    /// Module names in catalog order, `"Other"` last.
    pub fn module_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = self.modules.iter().map(|(m, _)| m.as_str()).collect();
        if !order.contains(&OTHER_MODULE) {
            order.push(OTHER_MODULE);
        }
        order
    }
}

impl Default for ModuleCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_MODULES.iter().map(|(m, tables)| (*m, tables.to_vec())))
    }
}

const DEFAULT_MODULES: &[(&str, &[&str])] = &[
    (
        "Core",
        &[
            "organizations",
            "organization_members",
            "users",
            "roles",
            "permissions",
            "role_permissions",
            "user_roles",
            "invitations",
            "audit_logs",
            "notifications",
            "activity_logs",
        ],
    ),
    (
        "Projects",
        &[
            "projects",
            "project_members",
            "project_phases",
            "project_documents",
            "project_templates",
            "tasks",
            "task_assignments",
            "task_comments",
            "milestones",
            "locations",
        ],
    ),
    (
        "Finance",
        &[
            "budgets",
            "budget_items",
            "budget_categories",
            "invoices",
            "invoice_items",
            "expenses",
            "payments",
            "transactions",
            "revenue",
            "financial_accounts",
        ],
    ),
    (
        "People",
        &[
            "people",
            "crew_members",
            "contacts",
            "departments",
            "positions",
            "teams",
            "team_members",
            "availability",
        ],
    ),
    (
        "Companies",
        &[
            "companies",
            "company_contacts",
            "company_documents",
            "clients",
            "vendors",
        ],
    ),
    (
        "Jobs",
        &[
            "jobs",
            "job_assignments",
            "job_applications",
            "job_postings",
            "timesheets",
            "time_entries",
        ],
    ),
    (
        "Programming",
        &[
            "events",
            "event_sessions",
            "schedules",
            "schedule_items",
            "performances",
            "venues",
            "run_of_show",
        ],
    ),
    (
        "Procurement",
        &[
            "purchase_orders",
            "purchase_order_items",
            "requisitions",
            "requisition_items",
            "suppliers",
            "quotes",
        ],
    ),
    (
        "Resources",
        &[
            "resources",
            "resource_allocations",
            "resource_bookings",
            "files",
            "documents",
        ],
    ),
    (
        "Assets",
        &[
            "assets",
            "asset_assignments",
            "asset_maintenance",
            "asset_categories",
            "inventory_items",
        ],
    ),
    (
        "Analytics",
        &["reports", "report_schedules", "metrics", "analytics_events", "kpis"],
    ),
    (
        "Pipeline",
        &["pipeline_stages", "opportunities", "leads", "deals", "proposals"],
    ),
    (
        "Settings",
        &[
            "settings",
            "organization_settings",
            "user_preferences",
            "integrations",
            "api_keys",
            "webhooks",
        ],
    ),
    ("Dashboard", &["dashboards", "dashboard_widgets", "saved_views"]),
    (
        "Profile",
        &["profiles", "user_profiles", "certifications", "skills", "emergency_contacts"],
    ),
    (
        "Marketplace",
        &[
            "marketplace_listings",
            "marketplace_contracts",
            "marketplace_reviews",
            "contracts",
            "bids",
        ],
    ),
];
