//! Ordered route protection rules.

use globset::{GlobBuilder, GlobMatcher};
use http::Method;

use notevault_core::config::{Access, AccessRuleConfig, AuthConfig};
use notevault_core::error::ConfigError;

/// One `(method, path pattern) -> access` rule.
#[derive(Debug, Clone)]
pub struct AccessRule {
    method: Option<Method>,
    pattern: String,
    matcher: GlobMatcher,
    access: Access,
}

impl AccessRule {
    /// Compiles a rule. `*` matches one path segment, `**` any number.
    pub fn new(method: Option<Method>, pattern: &str, access: Access) -> Result<Self, ConfigError> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("access rule pattern {pattern:?}: {e}")))?
            .compile_matcher();

        Ok(Self {
            method,
            pattern: pattern.to_string(),
            matcher,
            access,
        })
    }

    fn from_config(rule: &AccessRuleConfig) -> Result<Self, ConfigError> {
        let method = match rule.method.as_deref() {
            None | Some("*") => None,
            Some(m) => Some(Method::from_bytes(m.to_ascii_uppercase().as_bytes()).map_err(
                |_| ConfigError::Invalid(format!("access rule method {m:?} is not an HTTP method")),
            )?),
        };
        Self::new(method, &rule.pattern, rule.access)
    }

    /// Whether the rule applies to `method` and `path`.
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().is_none_or(|m| m == method) && self.matcher.is_match(path)
    }

    /// The method this rule is restricted to, if any.
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// The source glob.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Access granted on match.
    pub fn access(&self) -> Access {
        self.access
    }
}

/// First-match-wins list of [`AccessRule`]s with a fallback.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    default_access: Access,
}

impl AccessPolicy {
    /// Creates a policy from already compiled rules.
    pub fn new(rules: Vec<AccessRule>, default_access: Access) -> Self {
        Self {
            rules,
            default_access,
        }
    }

    /// The built-in policy: account and share resolution endpoints are
    /// public, everything else needs a bearer token.
    pub fn builtin() -> Result<Self, ConfigError> {
        let rules = vec![
            AccessRule::new(Some(Method::OPTIONS), "/**", Access::Public)?,
            AccessRule::new(Some(Method::GET), "/api/auth/me", Access::Authenticated)?,
            AccessRule::new(None, "/api/auth/**", Access::Public)?,
            AccessRule::new(Some(Method::GET), "/api/health", Access::Public)?,
            AccessRule::new(Some(Method::GET), "/share/*", Access::Public)?,
            AccessRule::new(Some(Method::GET), "/api/share/*", Access::Public)?,
        ];
        Ok(Self::new(rules, Access::Authenticated))
    }

    /// Builds the policy described by `auth.access_rules`, or the built-in
    /// one when no rules are configured.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        if config.access_rules.is_empty() {
            let mut policy = Self::builtin()?;
            policy.default_access = config.default_access;
            return Ok(policy);
        }
        let rules = config
            .access_rules
            .iter()
            .map(AccessRule::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules, config.default_access))
    }

    /// Access required for `method` on `path`.
    pub fn access_for(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(AccessRule::access)
            .unwrap_or(self.default_access)
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }
}
