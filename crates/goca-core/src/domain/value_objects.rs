//! Domain value objects: the closed value sets of enum-constrained settings.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity. The
//! configuration model stores the raw strings (so that an unrecognized value
//! becomes a validation diagnostic instead of a parse failure); these types
//! are what the validator and the typed accessors parse them into.
//!
//! Parsing is a case-sensitive exact match against the canonical spelling.
//!
//! # Adding New Variants
//!
//! 1. Add the variant and its spelling to the `config_enum!` invocation
//! 2. Done: `as_str`, `Display`, `FromStr` and `ALL` follow

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member of the value set, in declaration order.
            pub const ALL: &'static [Self] = &[$( Self::$variant ),+];

            /// Canonical spellings, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$( $text ),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    other => Err(DomainError::InvalidValue {
                        field: $field.into(),
                        value: other.into(),
                        reason: format!("expected one of: {}", Self::VALUES.join(", ")),
                    }),
                }
            }
        }
    };
}

// ── Database ─────────────────────────────────────────────────────────────────

config_enum! {
    /// Supported database backends.
    DatabaseKind, "database.type" {
        Postgres => "postgres",
        PostgresJson => "postgres-json",
        MySql => "mysql",
        MongoDb => "mongodb",
        Sqlite => "sqlite",
        SqlServer => "sqlserver",
        Elasticsearch => "elasticsearch",
        DynamoDb => "dynamodb",
    }
}

impl DatabaseKind {
    /// The network port this backend listens on by convention.
    ///
    /// `0` for backends without a host:port transport (embedded files,
    /// cloud SDK endpoints).
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Postgres | Self::PostgresJson => 5432,
            Self::MySql => 3306,
            Self::MongoDb => 27017,
            Self::SqlServer => 1433,
            Self::Elasticsearch => 9200,
            Self::Sqlite | Self::DynamoDb => 0,
        }
    }

    pub const fn uses_network(&self) -> bool {
        self.default_port() != 0
    }
}

// ── Architecture ─────────────────────────────────────────────────────────────

config_enum! {
    /// Dependency-injection strategy for generated wiring code.
    DiStrategy, "architecture.di.type" {
        Manual => "manual",
        Wire => "wire",
        Fx => "fx",
        Dig => "dig",
    }
}

config_enum! {
    /// Identifier case style for one class of identifiers.
    CaseStyle, "architecture.naming" {
        Pascal => "PascalCase",
        Camel => "camelCase",
        Snake => "snake_case",
        Kebab => "kebab-case",
        Upper => "UPPER_CASE",
        Lower => "lowercase",
    }
}

impl CaseStyle {
    /// Re-derive `name` in this style.
    pub fn apply(&self, name: &str) -> String {
        use crate::domain::naming;
        match self {
            Self::Pascal => naming::to_pascal_case(name),
            Self::Camel => naming::to_camel_case(name),
            Self::Snake => naming::to_snake_case(name),
            Self::Kebab => naming::to_kebab_case(name),
            Self::Upper => naming::to_upper_case(name),
            Self::Lower => naming::to_lower_case(name),
        }
    }
}

// ── Generation ───────────────────────────────────────────────────────────────

config_enum! {
    /// Validation library used by generated entities.
    ValidationLibrary, "generation.validation.library" {
        Builtin => "builtin",
        Validator => "validator",
        Ozzo => "ozzo-validation",
    }
}

// ── Testing ──────────────────────────────────────────────────────────────────

config_enum! {
    TestFramework, "testing.framework" {
        Testify => "testify",
        Ginkgo => "ginkgo",
        Builtin => "builtin",
    }
}

config_enum! {
    MockTool, "testing.mocks.tool" {
        Mockery => "mockery",
        GoMock => "gomock",
        Counterfeiter => "counterfeiter",
    }
}

// ── Features ─────────────────────────────────────────────────────────────────

config_enum! {
    AuthKind, "features.auth.type" {
        Jwt => "jwt",
        OAuth2 => "oauth2",
        Session => "session",
        Basic => "basic",
    }
}

config_enum! {
    CacheKind, "features.cache.type" {
        Redis => "redis",
        Memcached => "memcached",
        InMemory => "inmemory",
    }
}

config_enum! {
    LogLevel, "features.logging.level" {
        Debug => "debug",
        Info => "info",
        Warn => "warn",
        Error => "error",
    }
}

config_enum! {
    LogFormat, "features.logging.format" {
        Json => "json",
        Text => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!("postgres".parse::<DatabaseKind>().unwrap(), DatabaseKind::Postgres);
        assert!("Postgres".parse::<DatabaseKind>().is_err());
        assert!("POSTGRES".parse::<DatabaseKind>().is_err());
    }

    #[test]
    fn every_value_round_trips_through_as_str() {
        for kind in DatabaseKind::ALL {
            assert_eq!(kind.as_str().parse::<DatabaseKind>().unwrap(), *kind);
        }
        for style in CaseStyle::ALL {
            assert_eq!(style.as_str().parse::<CaseStyle>().unwrap(), *style);
        }
    }

    #[test]
    fn unknown_value_names_the_field() {
        let err = "oracle".parse::<DatabaseKind>().unwrap_err();
        match err {
            DomainError::InvalidValue { field, value, reason } => {
                assert_eq!(field, "database.type");
                assert_eq!(value, "oracle");
                assert!(reason.contains("postgres"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn default_ports_by_kind() {
        assert_eq!(DatabaseKind::Postgres.default_port(), 5432);
        assert_eq!(DatabaseKind::MySql.default_port(), 3306);
        assert_eq!(DatabaseKind::MongoDb.default_port(), 27017);
        assert_eq!(DatabaseKind::Sqlite.default_port(), 0);
        assert!(!DatabaseKind::Sqlite.uses_network());
    }

    #[test]
    fn case_style_applies_naming_helpers() {
        assert_eq!(CaseStyle::Snake.apply("OrderItem"), "order_item");
        assert_eq!(CaseStyle::Upper.apply("orderItem"), "ORDER_ITEM");
        assert_eq!(CaseStyle::Lower.apply("Order-Item"), "orderitem");
    }
}
