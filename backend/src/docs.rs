#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::common::ItemListQuery,
    models::{
        activity_log::{ActivityAction, ActivityLog, ActivityLogQuery},
        assignment::{
            AssignmentFilter, AssignmentResponse, AssignmentStatus, CreateAssignment,
            UpdateAssignment,
        },
        credential::{
            CreateCredential, Credential, CredentialSummary, CredentialType, UpdateCredential,
        },
        dashboard::{DashboardStats, InventoryCounts, StatusBreakdown},
        general_inventory::{
            CreateGeneralInventoryItem, GeneralInventoryItem, UpdateGeneralInventoryItem,
        },
        hardware::{CreateHardware, Hardware, HardwareType, UpdateHardware},
        item::{ItemKind, ItemStatus, StatusDrift},
        network_device::{CreateNetworkDevice, NetworkDevice, UpdateNetworkDevice},
        vlan::{CreateVlan, UpdateVlan, Vlan},
    },
    services::reconciliation::ReconciliationReport,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        list_hardware_doc,
        create_hardware_doc,
        get_hardware_doc,
        update_hardware_doc,
        delete_hardware_doc,
        hardware_assignments_doc,
        list_network_devices_doc,
        create_network_device_doc,
        get_network_device_doc,
        update_network_device_doc,
        delete_network_device_doc,
        network_device_assignments_doc,
        list_general_inventory_doc,
        create_general_inventory_doc,
        get_general_inventory_doc,
        update_general_inventory_doc,
        delete_general_inventory_doc,
        general_inventory_assignments_doc,
        list_vlans_doc,
        create_vlan_doc,
        get_vlan_doc,
        update_vlan_doc,
        delete_vlan_doc,
        list_credentials_doc,
        create_credential_doc,
        get_credential_doc,
        update_credential_doc,
        delete_credential_doc,
        list_assignments_doc,
        create_assignment_doc,
        get_assignment_doc,
        update_assignment_doc,
        delete_assignment_doc,
        return_assignment_doc,
        list_activity_logs_doc,
        dashboard_stats_doc,
        reconciliation_report_doc,
        reconciliation_repair_doc
    ),
    components(
        schemas(
            // items
            ItemStatus,
            ItemKind,
            Hardware,
            HardwareType,
            CreateHardware,
            UpdateHardware,
            NetworkDevice,
            CreateNetworkDevice,
            UpdateNetworkDevice,
            GeneralInventoryItem,
            CreateGeneralInventoryItem,
            UpdateGeneralInventoryItem,
            ItemListQuery,
            // standalone records
            Vlan,
            CreateVlan,
            UpdateVlan,
            Credential,
            CredentialSummary,
            CredentialType,
            CreateCredential,
            UpdateCredential,
            // ledger
            AssignmentStatus,
            AssignmentResponse,
            CreateAssignment,
            UpdateAssignment,
            AssignmentFilter,
            // activity & dashboard
            ActivityAction,
            ActivityLog,
            ActivityLogQuery,
            DashboardStats,
            InventoryCounts,
            StatusBreakdown,
            // maintenance
            StatusDrift,
            ReconciliationReport
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Hardware", description = "Hardware registry"),
        (name = "NetworkDevices", description = "Network device registry"),
        (name = "GeneralInventory", description = "General inventory registry"),
        (name = "Vlans", description = "VLAN registry"),
        (name = "Credentials", description = "Credential store (admin only)"),
        (name = "Assignments", description = "Assignment ledger"),
        (name = "Activity", description = "Activity log and dashboard"),
        (name = "Admin", description = "Maintenance endpoints")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

// Hardware

#[utoipa::path(
    get,
    path = "/api/hardware",
    params(ItemListQuery),
    responses((status = 200, description = "OK", body = [Hardware])),
    tag = "Hardware"
)]
fn list_hardware_doc() {}

#[utoipa::path(
    post,
    path = "/api/hardware",
    request_body = CreateHardware,
    responses(
        (status = 201, description = "Created", body = Hardware),
        (status = 400, description = "Invalid payload or status 'assigned'"),
        (status = 409, description = "Duplicate serial number")
    ),
    tag = "Hardware"
)]
fn create_hardware_doc() {}

#[utoipa::path(
    get,
    path = "/api/hardware/{id}",
    params(("id" = i64, Path, description = "Hardware ID")),
    responses((status = 200, description = "OK", body = Hardware), (status = 404, description = "Not found")),
    tag = "Hardware"
)]
fn get_hardware_doc() {}

#[utoipa::path(
    put,
    path = "/api/hardware/{id}",
    params(("id" = i64, Path, description = "Hardware ID")),
    request_body = UpdateHardware,
    responses(
        (status = 200, description = "OK", body = Hardware),
        (status = 404, description = "Not found"),
        (status = 409, description = "Status change conflicts with the assignment ledger")
    ),
    tag = "Hardware"
)]
fn update_hardware_doc() {}

#[utoipa::path(
    delete,
    path = "/api/hardware/{id}",
    params(("id" = i64, Path, description = "Hardware ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Item has an open assignment")
    ),
    tag = "Hardware"
)]
fn delete_hardware_doc() {}

#[utoipa::path(
    get,
    path = "/api/hardware/{id}/assignments",
    params(("id" = i64, Path, description = "Hardware ID")),
    responses((status = 200, description = "OK", body = [AssignmentResponse]), (status = 404, description = "Not found")),
    tag = "Hardware"
)]
fn hardware_assignments_doc() {}

// Network devices

#[utoipa::path(
    get,
    path = "/api/network-devices",
    params(ItemListQuery),
    responses((status = 200, description = "OK", body = [NetworkDevice])),
    tag = "NetworkDevices"
)]
fn list_network_devices_doc() {}

#[utoipa::path(
    post,
    path = "/api/network-devices",
    request_body = CreateNetworkDevice,
    responses(
        (status = 201, description = "Created", body = NetworkDevice),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Duplicate serial number")
    ),
    tag = "NetworkDevices"
)]
fn create_network_device_doc() {}

#[utoipa::path(
    get,
    path = "/api/network-devices/{id}",
    params(("id" = i64, Path, description = "Network device ID")),
    responses((status = 200, description = "OK", body = NetworkDevice), (status = 404, description = "Not found")),
    tag = "NetworkDevices"
)]
fn get_network_device_doc() {}

#[utoipa::path(
    put,
    path = "/api/network-devices/{id}",
    params(("id" = i64, Path, description = "Network device ID")),
    request_body = UpdateNetworkDevice,
    responses((status = 200, description = "OK", body = NetworkDevice), (status = 404, description = "Not found"), (status = 409, description = "Conflict")),
    tag = "NetworkDevices"
)]
fn update_network_device_doc() {}

#[utoipa::path(
    delete,
    path = "/api/network-devices/{id}",
    params(("id" = i64, Path, description = "Network device ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"), (status = 409, description = "Conflict")),
    tag = "NetworkDevices"
)]
fn delete_network_device_doc() {}

#[utoipa::path(
    get,
    path = "/api/network-devices/{id}/assignments",
    params(("id" = i64, Path, description = "Network device ID")),
    responses((status = 200, description = "OK", body = [AssignmentResponse]), (status = 404, description = "Not found")),
    tag = "NetworkDevices"
)]
fn network_device_assignments_doc() {}

// General inventory

#[utoipa::path(
    get,
    path = "/api/general-inventory",
    params(ItemListQuery),
    responses((status = 200, description = "OK", body = [GeneralInventoryItem])),
    tag = "GeneralInventory"
)]
fn list_general_inventory_doc() {}

#[utoipa::path(
    post,
    path = "/api/general-inventory",
    request_body = CreateGeneralInventoryItem,
    responses(
        (status = 201, description = "Created", body = GeneralInventoryItem),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Duplicate serial number")
    ),
    tag = "GeneralInventory"
)]
fn create_general_inventory_doc() {}

#[utoipa::path(
    get,
    path = "/api/general-inventory/{id}",
    params(("id" = i64, Path, description = "Inventory item ID")),
    responses((status = 200, description = "OK", body = GeneralInventoryItem), (status = 404, description = "Not found")),
    tag = "GeneralInventory"
)]
fn get_general_inventory_doc() {}

#[utoipa::path(
    put,
    path = "/api/general-inventory/{id}",
    params(("id" = i64, Path, description = "Inventory item ID")),
    request_body = UpdateGeneralInventoryItem,
    responses((status = 200, description = "OK", body = GeneralInventoryItem), (status = 404, description = "Not found"), (status = 409, description = "Conflict")),
    tag = "GeneralInventory"
)]
fn update_general_inventory_doc() {}

#[utoipa::path(
    delete,
    path = "/api/general-inventory/{id}",
    params(("id" = i64, Path, description = "Inventory item ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"), (status = 409, description = "Conflict")),
    tag = "GeneralInventory"
)]
fn delete_general_inventory_doc() {}

#[utoipa::path(
    get,
    path = "/api/general-inventory/{id}/assignments",
    params(("id" = i64, Path, description = "Inventory item ID")),
    responses((status = 200, description = "OK", body = [AssignmentResponse]), (status = 404, description = "Not found")),
    tag = "GeneralInventory"
)]
fn general_inventory_assignments_doc() {}

// VLANs

#[utoipa::path(
    get,
    path = "/api/vlans",
    responses((status = 200, description = "OK", body = [Vlan])),
    tag = "Vlans"
)]
fn list_vlans_doc() {}

#[utoipa::path(
    post,
    path = "/api/vlans",
    request_body = CreateVlan,
    responses(
        (status = 201, description = "Created", body = Vlan),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "VLAN number already in use")
    ),
    tag = "Vlans"
)]
fn create_vlan_doc() {}

#[utoipa::path(
    get,
    path = "/api/vlans/{id}",
    params(("id" = i64, Path, description = "VLAN ID")),
    responses((status = 200, description = "OK", body = Vlan), (status = 404, description = "Not found")),
    tag = "Vlans"
)]
fn get_vlan_doc() {}

#[utoipa::path(
    put,
    path = "/api/vlans/{id}",
    params(("id" = i64, Path, description = "VLAN ID")),
    request_body = UpdateVlan,
    responses((status = 200, description = "OK", body = Vlan), (status = 404, description = "Not found"), (status = 409, description = "Conflict")),
    tag = "Vlans"
)]
fn update_vlan_doc() {}

#[utoipa::path(
    delete,
    path = "/api/vlans/{id}",
    params(("id" = i64, Path, description = "VLAN ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")),
    tag = "Vlans"
)]
fn delete_vlan_doc() {}

// Credentials

#[utoipa::path(
    get,
    path = "/api/credentials",
    responses((status = 200, description = "Secrets omitted", body = [CredentialSummary]), (status = 403, description = "Forbidden")),
    tag = "Credentials"
)]
fn list_credentials_doc() {}

#[utoipa::path(
    post,
    path = "/api/credentials",
    request_body = CreateCredential,
    responses((status = 201, description = "Created", body = CredentialSummary), (status = 400, description = "Invalid request"), (status = 403, description = "Forbidden")),
    tag = "Credentials"
)]
fn create_credential_doc() {}

#[utoipa::path(
    get,
    path = "/api/credentials/{id}",
    params(("id" = i64, Path, description = "Credential ID")),
    responses((status = 200, description = "OK", body = Credential), (status = 403, description = "Forbidden"), (status = 404, description = "Not found")),
    tag = "Credentials"
)]
fn get_credential_doc() {}

#[utoipa::path(
    put,
    path = "/api/credentials/{id}",
    params(("id" = i64, Path, description = "Credential ID")),
    request_body = UpdateCredential,
    responses((status = 200, description = "OK", body = CredentialSummary), (status = 403, description = "Forbidden"), (status = 404, description = "Not found")),
    tag = "Credentials"
)]
fn update_credential_doc() {}

#[utoipa::path(
    delete,
    path = "/api/credentials/{id}",
    params(("id" = i64, Path, description = "Credential ID")),
    responses((status = 204, description = "Deleted"), (status = 403, description = "Forbidden"), (status = 404, description = "Not found")),
    tag = "Credentials"
)]
fn delete_credential_doc() {}

// Assignments

#[utoipa::path(
    get,
    path = "/api/assignments",
    params(AssignmentFilter),
    responses((status = 200, description = "OK", body = [AssignmentResponse])),
    tag = "Assignments"
)]
fn list_assignments_doc() {}

#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Created", body = AssignmentResponse),
        (status = 400, description = "Not exactly one item reference"),
        (status = 404, description = "Item not found"),
        (status = 409, description = "Item is not in stock or already has an open assignment")
    ),
    tag = "Assignments"
)]
fn create_assignment_doc() {}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(("id" = i64, Path, description = "Assignment ID")),
    responses((status = 200, description = "OK", body = AssignmentResponse), (status = 404, description = "Not found")),
    tag = "Assignments"
)]
fn get_assignment_doc() {}

#[utoipa::path(
    put,
    path = "/api/assignments/{id}",
    params(("id" = i64, Path, description = "Assignment ID")),
    request_body = UpdateAssignment,
    responses(
        (status = 200, description = "OK", body = AssignmentResponse),
        (status = 400, description = "Attempt to change the referenced item"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Status transition not allowed")
    ),
    tag = "Assignments"
)]
fn update_assignment_doc() {}

#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(("id" = i64, Path, description = "Assignment ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")),
    tag = "Assignments"
)]
fn delete_assignment_doc() {}

#[utoipa::path(
    post,
    path = "/api/assignments/{id}/return",
    params(("id" = i64, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "OK", body = AssignmentResponse),
        (status = 404, description = "Not found"),
        (status = 409, description = "Already returned")
    ),
    tag = "Assignments"
)]
fn return_assignment_doc() {}

// Activity & dashboard

#[utoipa::path(
    get,
    path = "/api/activity-logs",
    params(ActivityLogQuery),
    responses((status = 200, description = "OK", body = [ActivityLog])),
    tag = "Activity"
)]
fn list_activity_logs_doc() {}

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses((status = 200, description = "OK", body = DashboardStats)),
    tag = "Activity"
)]
fn dashboard_stats_doc() {}

// Maintenance

#[utoipa::path(
    get,
    path = "/api/admin/reconciliation",
    responses((status = 200, description = "OK", body = ReconciliationReport), (status = 403, description = "Forbidden")),
    tag = "Admin"
)]
fn reconciliation_report_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/reconciliation",
    responses((status = 200, description = "OK", body = ReconciliationReport), (status = 403, description = "Forbidden")),
    tag = "Admin"
)]
fn reconciliation_repair_doc() {}
