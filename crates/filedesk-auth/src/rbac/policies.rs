//! Role-to-screen and role-to-action mapping definitions.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use filedesk_entity::user::Role;

/// Console screens an authenticated user can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// The user's own file list.
    Dashboard,
    /// File upload with date range and history.
    Upload,
    /// Activity log.
    Analytics,
    /// Cross-client file browser.
    AdminDashboard,
}

impl Screen {
    /// Every screen, in menu order.
    pub const ALL: [Screen; 4] = [
        Screen::Dashboard,
        Screen::Upload,
        Screen::Analytics,
        Screen::AdminDashboard,
    ];

    /// Menu label.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Upload => "Upload",
            Self::Analytics => "Analytics",
            Self::AdminDashboard => "Admin Dashboard",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// An action the console performs against the backend on a user's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsolePermission {
    /// List files visible to the user.
    FileList,
    /// Upload a spreadsheet.
    FileUpload,
    /// Download a file.
    FileDownload,
    /// Delete any file.
    FileDelete,
    /// Read upload history.
    HistoryView,
    /// List client organisations.
    ClientList,
    /// Browse another client's files.
    ClientFilesView,
    /// Read the activity log.
    ActivityLogView,
}

/// Defines which screens and actions each role may use.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → visible screens.
    screens: HashMap<Role, HashSet<Screen>>,
    /// Role → allowed actions.
    permissions: HashMap<Role, HashSet<ConsolePermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use ConsolePermission::*;

        let mut screens = HashMap::new();
        let mut permissions = HashMap::new();

        // Client: own files and uploads
        screens.insert(
            Role::Client,
            [Screen::Dashboard, Screen::Upload].into_iter().collect(),
        );
        permissions.insert(
            Role::Client,
            [FileList, FileDownload, FileUpload, HistoryView]
                .into_iter()
                .collect(),
        );

        // Employee: read-only access to their client's files
        screens.insert(Role::Employee, [Screen::Dashboard].into_iter().collect());
        permissions.insert(
            Role::Employee,
            [FileList, FileDownload].into_iter().collect(),
        );

        // Admin: everything
        screens.insert(Role::Admin, Screen::ALL.into_iter().collect());
        permissions.insert(
            Role::Admin,
            [
                FileList,
                FileDownload,
                FileUpload,
                FileDelete,
                HistoryView,
                ClientList,
                ClientFilesView,
                ActivityLogView,
            ]
            .into_iter()
            .collect(),
        );

        Self {
            screens,
            permissions,
        }
    }

    /// Screens visible to `role`, in menu order.
    pub fn screens_for_role(&self, role: &Role) -> Vec<Screen> {
        Screen::ALL
            .into_iter()
            .filter(|s| self.can_view(role, s))
            .collect()
    }

    pub fn can_view(&self, role: &Role, screen: &Screen) -> bool {
        self.screens
            .get(role)
            .map(|set| set.contains(screen))
            .unwrap_or(false)
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: &Role) -> HashSet<ConsolePermission> {
        self.permissions.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: &Role, permission: &ConsolePermission) -> bool {
        self.permissions
            .get(role)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
