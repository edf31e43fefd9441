/// Host platform facts used for the default user agent and `dh`.
pub trait TrackerEnvironment {
    fn hostname(&self) -> String;
    fn os_platform(&self) -> String;
    fn os_version(&self) -> String;
    fn os_version_string(&self) -> String;
}

/// Environment read from the running machine.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    hostname: String,
    os_version: String,
}

impl SystemEnvironment {
    pub fn detect() -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "localhost".to_string());
        Self {
            hostname,
            os_version: detect_os_version(),
        }
    }
}

impl TrackerEnvironment for SystemEnvironment {
    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn os_platform(&self) -> String {
        std::env::consts::OS.to_string()
    }

    fn os_version(&self) -> String {
        self.os_version.clone()
    }

    fn os_version_string(&self) -> String {
        format!(
            "{} {} {}",
            std::env::consts::OS,
            self.os_version,
            std::env::consts::ARCH
        )
    }
}

#[cfg(target_os = "linux")]
fn detect_os_version() -> String {
    std::fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(not(target_os = "linux"))]
fn detect_os_version() -> String {
    "unknown".to_string()
}

/// Environment with fixed values.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    pub hostname: String,
    pub os_platform: String,
    pub os_version: String,
    pub os_version_string: String,
}

impl TrackerEnvironment for StaticEnvironment {
    fn hostname(&self) -> String {
        self.hostname.clone()
    }

    fn os_platform(&self) -> String {
        self.os_platform.clone()
    }

    fn os_version(&self) -> String {
        self.os_version.clone()
    }

    fn os_version_string(&self) -> String {
        self.os_version_string.clone()
    }
}

/// `"GoogleAnalyticsTracker/<version> (<platform>; <version>; <versionString>)"`
///
/// `<version>` is this crate's package version, not a fixed `3.0`, so the
/// product token changes with every release. Set `Options::user_agent` to
/// pin the exact bytes.
pub fn default_user_agent(env: &dyn TrackerEnvironment) -> String {
    format!(
        "GoogleAnalyticsTracker/{} ({}; {}; {})",
        env!("CARGO_PKG_VERSION"),
        env.os_platform(),
        env.os_version(),
        env.os_version_string()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_format() {
        let env = StaticEnvironment {
            hostname: "box".to_string(),
            os_platform: "linux".to_string(),
            os_version: "6.1".to_string(),
            os_version_string: "Linux 6.1".to_string(),
        };
        assert_eq!(
            default_user_agent(&env),
            format!(
                "GoogleAnalyticsTracker/{} (linux; 6.1; Linux 6.1)",
                env!("CARGO_PKG_VERSION")
            )
        );
    }

    #[test]
    fn system_environment_reports_platform() {
        let env = SystemEnvironment::detect();
        assert_eq!(env.os_platform(), std::env::consts::OS);
        assert!(!env.os_version().is_empty());
    }
}
