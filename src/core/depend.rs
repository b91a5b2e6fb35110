//! Dependency and provision strings.
//!
//! Both use the same `name[<op><version>]` syntax, e.g. `libfoo`,
//! `libfoo.so=1-64` or `python>=3.11`.

use std::fmt;

use crate::core::version::vercmp;

/// Version constraint operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepMod {
    /// No version constraint
    Any,
    Eq,
    Ge,
    Le,
    Gt,
    Lt,
}

impl DepMod {
    fn as_str(&self) -> &'static str {
        match self {
            DepMod::Any => "",
            DepMod::Eq => "=",
            DepMod::Ge => ">=",
            DepMod::Le => "<=",
            DepMod::Gt => ">",
            DepMod::Lt => "<",
        }
    }
}

/// A parsed dependency or provision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Depend {
    name: String,
    depmod: DepMod,
    version: Option<String>,
}

impl Depend {
    /// A constraint-free dependency on `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Depend {
            name: name.into(),
            depmod: DepMod::Any,
            version: None,
        }
    }

    /// Parse `name[<op><version>]`.
    ///
    /// An optional-dependency description after `: ` is dropped. An operator
    /// with nothing after it is treated as no constraint.
    pub fn parse(s: &str) -> Self {
        let s = s.split_once(": ").map_or(s, |(dep, _desc)| dep).trim();

        let Some(idx) = s.find(['<', '>', '=']) else {
            return Depend::new(s);
        };

        let name = &s[..idx];
        let rest = &s[idx..];
        let (depmod, version) = if let Some(v) = rest.strip_prefix(">=") {
            (DepMod::Ge, v)
        } else if let Some(v) = rest.strip_prefix("<=") {
            (DepMod::Le, v)
        } else if let Some(v) = rest.strip_prefix('=') {
            (DepMod::Eq, v)
        } else if let Some(v) = rest.strip_prefix('>') {
            (DepMod::Gt, v)
        } else if let Some(v) = rest.strip_prefix('<') {
            (DepMod::Lt, v)
        } else {
            (DepMod::Any, "")
        };

        if version.is_empty() {
            return Depend::new(name);
        }

        Depend {
            name: name.to_string(),
            depmod,
            version: Some(version.to_string()),
        }
    }

    /// Get the dependency name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the constraint operator.
    pub fn depmod(&self) -> DepMod {
        self.depmod
    }

    /// Get the constraint version, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Whether `version` meets this constraint.
    pub fn version_matches(&self, version: &str) -> bool {
        let Some(wanted) = self.version.as_deref() else {
            return true;
        };

        let ord = vercmp(version, wanted);
        match self.depmod {
            DepMod::Any => true,
            DepMod::Eq => ord.is_eq(),
            DepMod::Ge => ord.is_ge(),
            DepMod::Le => ord.is_le(),
            DepMod::Gt => ord.is_gt(),
            DepMod::Lt => ord.is_lt(),
        }
    }

    /// Whether a provision satisfies this dependency.
    ///
    /// An unversioned provision only satisfies unconstrained dependencies.
    pub fn is_satisfied_by_provision(&self, provision: &Depend) -> bool {
        if provision.name != self.name {
            return false;
        }

        if self.depmod == DepMod::Any {
            return true;
        }

        match (provision.depmod, provision.version()) {
            (DepMod::Eq, Some(version)) => self.version_matches(version),
            _ => false,
        }
    }
}

impl fmt::Display for Depend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(version) = &self.version {
            write!(f, "{}{}", self.depmod.as_str(), version)?;
        }
        Ok(())
    }
}
