use crate::targets::TargetSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory the flows historically lived in.
pub const DEFAULT_DIRECTORY: &str = "/Users/rezivure/git/Grid-Mobile/.maestro";

const DEFAULT_FILES: &[&str] = &[
    "13_create_group.yaml",
    "45_friend_request_full_lifecycle.yaml",
    "46_decline_friend_request_lifecycle.yaml",
    "46_incoming_location_update.yaml",
    "47_notification_badge_friend_request.yaml",
    "47_send_friend_request_outbound.yaml",
    "48_accept_group_invite_flow.yaml",
    "48_group_full_lifecycle.yaml",
    "49_decline_group_invite_flow.yaml",
    "49_group_invite_received.yaml",
    "50_group_member_kicked.yaml",
    "51_location_realtime_updates.yaml",
    "52_multiple_friends_on_map.yaml",
    "53_stale_location_indicator.yaml",
    "54_incognito_mode_toggle.yaml",
    "55_sign_out_clears_friends.yaml",
    "56_contact_goes_incognito.yaml",
    "56_display_name_update_visible.yaml",
    "57_group_member_leaves.yaml",
    "57_multiple_pending_invites.yaml",
    "58_avatar_update_propagation.yaml",
    "58_group_and_friend_invites_mixed.yaml",
    "59_friend_unfriend_refriend.yaml",
    "59_multiple_friend_requests.yaml",
    "60_location_history_trail.yaml",
    "61_sign_out_clean_state.yaml",
    "62_complete_social_morning_routine.yaml",
    "63_group_event_coordination_lifecycle.yaml",
    "64_privacy_lifecycle_work_weekend.yaml",
    "65_background_location_sharing.yaml",
    "66_app_kill_and_restore.yaml",
    "67_background_sync_burst.yaml",
    "68_app_backgrounded_friend_request.yaml",
    "69_app_backgrounded_group_invite.yaml",
    "70_rapid_app_switching.yaml",
    "72_rapid_location_updates.yaml",
    "74_many_pending_invites.yaml",
    "75_location_persistence_across_restart.yaml",
    "76_group_state_after_restart.yaml",
    "78_incognito_survives_restart.yaml",
    "79_offline_queue.yaml",
    "80_slow_sync.yaml",
    "81_full_regression_journey.yaml",
    "e2e_01_incoming_location_sharing.yaml",
    "e2e_02_friend_request_received.yaml",
    "e2e_03_group_invite_received.yaml",
    "e2e_04_multiple_locations_map.yaml",
    "e2e_05_group_member_locations.yaml",
    "e2e_06_display_name_propagation.yaml",
    "e2e_07_user_presence_status.yaml",
    "e2e_08_removed_from_group.yaml",
    "e2e_09_friend_request_accepted_api.yaml",
];

const DEFAULT_ALREADY_FIXED: &[&str] = &[
    "71_many_friends_map_load.yaml",
    "73_large_group.yaml",
    "11_accept_friend_request.yaml",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the flow files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Candidate files, processed in this order
    #[serde(default = "default_files")]
    pub files: Vec<String>,

    /// Files that must never be read or written
    #[serde(default = "default_already_fixed")]
    pub already_fixed: Vec<String>,

    #[serde(default)]
    pub scan: ScanConfig,
}

/// Directory scan used instead of the explicit file list when enabled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_include")]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            files: default_files(),
            already_fixed: default_already_fixed(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_DIRECTORY)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn default_files() -> Vec<String> {
    to_strings(DEFAULT_FILES)
}

fn default_already_fixed() -> Vec<String> {
    to_strings(DEFAULT_ALREADY_FIXED)
}

fn default_include() -> Vec<String> {
    to_strings(&["*.yaml", "*.yml"])
}

impl Config {
    /// Load config from .runfix/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(".runfix").join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The candidate selection this config describes
    pub fn target_set(&self) -> TargetSet {
        if self.scan.enabled {
            let mut exclude = self.scan.exclude.clone();
            exclude.extend(self.already_fixed.iter().cloned());
            TargetSet::Scan {
                include: self.scan.include.clone(),
                exclude,
            }
        } else {
            TargetSet::List {
                files: self.files.clone(),
                exclude: self.already_fixed.clone(),
            }
        }
    }
}
