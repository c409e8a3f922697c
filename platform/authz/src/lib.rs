//! Role tags, named permissions and the static role-to-permission table.
//!
//! Permissions derive purely from the role tag; there is no per-row ACL.
//! The gate itself is pure and synchronous.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum AuthzError {
    #[error("permission {0} denied")]
    Denied(&'static str),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleTag {
    Employee,
    Hr,
    External,
}

impl RoleTag {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleTag::Employee => "employee",
            RoleTag::Hr => "hr",
            RoleTag::External => "external",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "employee" => Some(RoleTag::Employee),
            "hr" => Some(RoleTag::Hr),
            "external" => Some(RoleTag::External),
            _ => None,
        }
    }

    /// The static permission set for this role.
    pub fn permissions(self) -> &'static [Permission] {
        match self {
            RoleTag::Employee => EMPLOYEE_PERMISSIONS,
            RoleTag::Hr => HR_PERMISSIONS,
            RoleTag::External => EXTERNAL_PERMISSIONS,
        }
    }

    pub fn grants(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Permission {
    ViewPersonalInfo,
    SendLeaveRequest,
    ViewAllLeaveRequests,
    ApproveDenyLeaveRequests,
    ViewAllEmployees,
    CreateEmployee,
    EditEmployee,
    DeleteEmployee,
    ViewAllExternalRequests,
    RespondToExternalRequests,
    ViewAllProjects,
    CreateProject,
    EditProject,
    DeleteProject,
    ViewOwnProjects,
    SendRequest,
    ViewProjects,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ViewPersonalInfo => "view_personal_info",
            Permission::SendLeaveRequest => "send_leave_request",
            Permission::ViewAllLeaveRequests => "view_all_leave_requests",
            Permission::ApproveDenyLeaveRequests => "approve_deny_leave_requests",
            Permission::ViewAllEmployees => "view_all_employees",
            Permission::CreateEmployee => "create_employee",
            Permission::EditEmployee => "edit_employee",
            Permission::DeleteEmployee => "delete_employee",
            Permission::ViewAllExternalRequests => "view_all_external_requests",
            Permission::RespondToExternalRequests => "respond_to_external_requests",
            Permission::ViewAllProjects => "view_all_projects",
            Permission::CreateProject => "create_project",
            Permission::EditProject => "edit_project",
            Permission::DeleteProject => "delete_project",
            Permission::ViewOwnProjects => "view_own_projects",
            Permission::SendRequest => "send_request",
            Permission::ViewProjects => "view_projects",
        }
    }
}

const EMPLOYEE_PERMISSIONS: &[Permission] = &[
    Permission::ViewPersonalInfo,
    Permission::SendLeaveRequest,
    Permission::ViewAllLeaveRequests,
    Permission::ViewAllProjects,
];

const HR_PERMISSIONS: &[Permission] = &[
    Permission::ViewAllEmployees,
    Permission::CreateEmployee,
    Permission::EditEmployee,
    Permission::DeleteEmployee,
    Permission::ViewAllLeaveRequests,
    Permission::ApproveDenyLeaveRequests,
    Permission::ViewAllExternalRequests,
    Permission::RespondToExternalRequests,
    Permission::ViewAllProjects,
    Permission::CreateProject,
    Permission::EditProject,
    Permission::DeleteProject,
    Permission::ViewProjects,
];

const EXTERNAL_PERMISSIONS: &[Permission] = &[
    Permission::ViewOwnProjects,
    Permission::SendRequest,
    Permission::ViewProjects,
];

/// Permission gate: reject with `Denied` unless the role's static set
/// contains the named permission.
pub fn require(role: RoleTag, permission: Permission) -> Result<(), AuthzError> {
    if role.grants(permission) {
        Ok(())
    } else {
        Err(AuthzError::Denied(permission.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_tags_roundtrip_through_strings() {
        for role in [RoleTag::Employee, RoleTag::Hr, RoleTag::External] {
            assert_eq!(RoleTag::parse(role.as_str()), Some(role));
        }
        assert_eq!(RoleTag::parse("admin"), None);
    }

    #[test]
    fn every_listed_permission_passes_the_gate() {
        for role in [RoleTag::Employee, RoleTag::Hr, RoleTag::External] {
            for &permission in role.permissions() {
                assert_eq!(require(role, permission), Ok(()));
            }
        }
    }

    #[test]
    fn employees_cannot_manage_employees() {
        assert!(require(RoleTag::Employee, Permission::CreateEmployee).is_err());
        assert!(require(RoleTag::Employee, Permission::DeleteEmployee).is_err());
        assert!(require(RoleTag::Employee, Permission::ApproveDenyLeaveRequests).is_err());
    }

    #[test]
    fn externals_cannot_touch_leave_requests() {
        assert!(require(RoleTag::External, Permission::SendLeaveRequest).is_err());
        assert!(require(RoleTag::External, Permission::ViewAllLeaveRequests).is_err());
    }

    #[test]
    fn hr_cannot_impersonate_workers() {
        assert!(require(RoleTag::Hr, Permission::SendLeaveRequest).is_err());
        assert!(require(RoleTag::Hr, Permission::SendRequest).is_err());
        assert!(require(RoleTag::Hr, Permission::ViewPersonalInfo).is_err());
    }

    #[test]
    fn denial_names_the_permission() {
        let err = require(RoleTag::External, Permission::DeleteProject).unwrap_err();
        assert_eq!(err, AuthzError::Denied("delete_project"));
    }
}
