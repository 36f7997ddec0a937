pub mod dashboard_consts {
    //! Dashboard Policy Constants
    //!
    //! Timing and layout policy for the browser-side dashboard and its backend,
    //! organized by functional area.

    // =============================================================================
    // TABLE LAYOUT
    // =============================================================================

    /// Table layout shared by every row state.
    pub mod table {
        /// Number of placeholder rows rendered while a fetch is in flight.
        pub const SKELETON_ROWS: usize = 5;

        /// Column labels, in display order. Every row state spans all of them.
        pub const COLUMNS: [&str; 7] = [
            "Name",
            "Cluster",
            "Status",
            "vCPUs",
            "Memory",
            "IP Addresses",
            "Actions",
        ];

        /// Number of columns in the VM table.
        pub const COLUMN_COUNT: usize = COLUMNS.len();

        /// Element id of the synthetic "no results" row inserted by the filter.
        pub const NO_RESULTS_ROW_ID: &str = "no-results-row";
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// VM list fetching configuration
    pub mod fetching {
        use std::time::Duration;

        /// The single endpoint the dashboard reads from.
        pub const VMS_ENDPOINT: &str = "/api/vms";

        /// Retries after the first attempt (3 attempts in total).
        pub const MAX_RETRIES: u32 = 2;

        /// Fixed delay between attempts (milliseconds)
        pub const RETRY_DELAY_MS: u64 = 1000;

        /// Helper function to get the retry delay
        pub const fn retry_delay() -> Duration {
            Duration::from_millis(RETRY_DELAY_MS)
        }
    }

    // =============================================================================
    // TIMERS
    // =============================================================================

    /// Fire-once timers driven by the dashboard controller.
    pub mod timing {
        use std::time::Duration;

        /// Cosmetic delay before the first fetch so the entrance animation can play.
        pub const INITIAL_LOAD_DELAY_MS: u64 = 800;

        /// Quiet period before a search keystroke is applied.
        pub const SEARCH_DEBOUNCE_MS: u64 = 300;

        /// Time the refresh button keeps its loading state after a cycle ends.
        pub const REFRESH_BUTTON_RESET_MS: u64 = 300;

        /// Delay between the session-expired toast and the login redirect.
        pub const AUTH_REDIRECT_DELAY_MS: u64 = 2000;

        /// Upper bound on a toast exit animation, used when no
        /// `animationend` notification arrives.
        pub const TOAST_EXIT_FALLBACK_MS: u64 = 400;

        pub const fn initial_load_delay() -> Duration {
            Duration::from_millis(INITIAL_LOAD_DELAY_MS)
        }

        pub const fn search_debounce() -> Duration {
            Duration::from_millis(SEARCH_DEBOUNCE_MS)
        }

        pub const fn refresh_button_reset() -> Duration {
            Duration::from_millis(REFRESH_BUTTON_RESET_MS)
        }

        pub const fn auth_redirect_delay() -> Duration {
            Duration::from_millis(AUTH_REDIRECT_DELAY_MS)
        }

        pub const fn toast_exit_fallback() -> Duration {
            Duration::from_millis(TOAST_EXIT_FALLBACK_MS)
        }
    }

    /// Toast lifetimes
    pub mod toast {
        use std::time::Duration;

        /// Lifetime of a toast created without an explicit duration.
        pub const DEFAULT_DURATION_MS: u64 = 5000;

        /// Lifetime of the "Data Refreshed" toast.
        pub const REFRESHED_DURATION_MS: u64 = 3000;

        /// Lifetime of the "Session Expired" toast.
        pub const SESSION_EXPIRED_DURATION_MS: u64 = 2000;

        pub const fn default_duration() -> Duration {
            Duration::from_millis(DEFAULT_DURATION_MS)
        }
    }

    // =============================================================================
    // SESSION & PREFERENCES
    // =============================================================================

    pub mod session {
        /// Redirect target when a 401 body carries none.
        pub const DEFAULT_LOGIN_PATH: &str = "/login";

        /// Client-local storage key of the theme preference.
        pub const THEME_KEY: &str = "theme";
    }

    // =============================================================================
    // BACKEND CONFIGURATION
    // =============================================================================

    pub mod server {
        /// Default listen address of `vm-dashboard serve`.
        pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

        /// Prism Central API port.
        pub const PRISM_PORT: u16 = 9440;

        /// Page size requested from Prism Central list endpoints.
        pub const PRISM_PAGE_LENGTH: u32 = 1000;

        /// Name of the signed session cookie.
        pub const SESSION_COOKIE: &str = "vm_dashboard_session";

        /// Failed login attempts allowed per username within the window.
        pub const LOGIN_MAX_ATTEMPTS: u32 = 5;

        /// Login throttling window (seconds)
        pub const LOGIN_WINDOW_SECS: u64 = 60;
    }
}
