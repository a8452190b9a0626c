//! # Message Registry - (code, version) Dispatch
//!
//! ## Purpose
//!
//! Process-wide lookup from a message code and optional version to the
//! [`MessageSpec`] able to decode it. State is two append-only maps — the
//! entries themselves and a first-registration-wins default version per
//! code — guarded by a single lock so concurrent registration and
//! resolution observe them consistently.
//!
//! ## Lazy Loading
//!
//! Resolution consults an optional load hook before looking anything up:
//! a plain function the hosting catalogue installs, given a [`ModuleHint`]
//! derived from the code's service prefix and the requested version. The
//! hook registers whatever implementations it knows for that hint and
//! answers Loaded or NotFound; NotFound is swallowed by contract, because
//! the implementation may already be registered through another path.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use xmldoc::Element;

use crate::constants::{DEFAULT_VERSION_QUALIFIER, MESSAGE_CODE_TAG, SERVICE_PREFIX_LEN};
use crate::error::{WireError, WireResult};
use crate::record::MessageSpec;

/// What a load hook reports back for one module hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The hint matched a module and its implementations were registered
    Loaded,
    /// Nothing known for this hint; resolution continues regardless
    NotFound,
}

/// Best-effort registration hook consulted during resolution.
pub type LoadHook = fn(&ModuleHint, &Registry) -> LoadOutcome;

/// Module identity derived from a message code and requested version.
///
/// For code `STR0005` this yields service `str` and module `str0005`; the
/// qualifier is the version with separators stripped (`10.2` → `102`) or
/// the literal default marker when no version was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHint {
    service: String,
    module: String,
    qualifier: String,
}

impl ModuleHint {
    pub fn derive(code: &str, version: Option<&str>) -> Self {
        let module = code.to_ascii_lowercase();
        let service = module.chars().take(SERVICE_PREFIX_LEN).collect();
        let qualifier = match version {
            Some(version) => version
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect(),
            None => DEFAULT_VERSION_QUALIFIER.to_string(),
        };
        Self {
            service,
            module,
            qualifier,
        }
    }

    /// Lower-cased service prefix, e.g. `str`.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Lower-cased full code, e.g. `str0005`.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Version qualifier with separators stripped, or the default marker.
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }
}

impl fmt::Display for ModuleHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}_{}", self.service, self.module, self.qualifier)
    }
}

#[derive(Default)]
struct Inner {
    entries: HashMap<(String, String), &'static MessageSpec>,
    default_version: HashMap<String, String>,
}

/// Append-only dispatch table from (code, version) to implementations.
pub struct Registry {
    inner: RwLock<Inner>,
    hook: RwLock<Option<LoadHook>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            hook: RwLock::new(None),
        }
    }

    /// The process-wide registry instance.
    pub fn global() -> &'static Registry {
        static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);
        &GLOBAL
    }

    /// Install the load hook consulted by [`Registry::resolve`]. The last
    /// installed hook wins.
    pub fn install_hook(&self, hook: LoadHook) {
        *self.hook.write().unwrap() = Some(hook);
    }

    /// Register one implementation. The first version ever registered for
    /// a code becomes that code's default version and is never displaced.
    pub fn register(&self, spec: &'static MessageSpec) {
        let code = spec.code.to_ascii_uppercase();
        let mut inner = self.inner.write().unwrap();
        inner
            .default_version
            .entry(code.clone())
            .or_insert_with(|| spec.version.to_string());
        inner.entries.insert((code, spec.version.to_string()), spec);
        trace!(code = spec.code, version = spec.version, "registered message implementation");
    }

    /// The default version recorded for a code, if any version was ever
    /// registered.
    pub fn default_version(&self, code: &str) -> Option<String> {
        let code = code.trim().to_ascii_uppercase();
        self.inner.read().unwrap().default_version.get(&code).cloned()
    }

    /// Resolve a message code (and optional version) to an implementation.
    ///
    /// The load hook is consulted before the lookup and once more after a
    /// miss, covering registrations the first attempt set in motion. When
    /// no version is given the code's default version is used; a code
    /// without one fails with [`WireError::NoDefaultVersion`].
    pub fn resolve(
        &self,
        code: &str,
        version: Option<&str>,
    ) -> WireResult<&'static MessageSpec> {
        let code = code.trim().to_ascii_uppercase();
        let hint = ModuleHint::derive(&code, version);
        debug!(code = %code, version = version.unwrap_or("<default>"), "resolving message implementation");

        self.try_load(&hint);

        let version = match version {
            Some(version) => version.to_string(),
            None => self
                .default_version(&code)
                .ok_or_else(|| WireError::no_default_version(&code))?,
        };

        if let Some(spec) = self.lookup(&code, &version) {
            return Ok(spec);
        }
        self.try_load(&hint);
        self.lookup(&code, &version)
            .ok_or_else(|| WireError::not_implemented(&code, &version))
    }

    fn lookup(&self, code: &str, version: &str) -> Option<&'static MessageSpec> {
        self.inner
            .read()
            .unwrap()
            .entries
            .get(&(code.to_string(), version.to_string()))
            .copied()
    }

    fn try_load(&self, hint: &ModuleHint) {
        let hook = *self.hook.read().unwrap();
        let Some(hook) = hook else {
            return;
        };
        match hook(hint, self) {
            LoadOutcome::Loaded => debug!(module = %hint, "load hook registered module"),
            LoadOutcome::NotFound => trace!(module = %hint, "load hook had nothing for module"),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the message code from a raw document: the first text content of
/// an element literally named `CodMsg`, anywhere in the tree.
pub fn extract_message_code(doc: &Element) -> WireResult<&str> {
    doc.descendant_text(MESSAGE_CODE_TAG)
        .ok_or(WireError::CodeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Descriptor, Shape};
    use crate::record::{decode_boxed, FieldValue, FromTree, Message, RawRecord};
    use once_cell::sync::Lazy;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Ping {
        code: Option<String>,
    }

    static PING: Lazy<Descriptor> = Lazy::new(|| {
        Descriptor::build("Ping", &[("code", "TST0001/CodMsg/text()", Shape::Scalar)]).unwrap()
    });

    impl Message for Ping {
        fn descriptor(&self) -> &'static Descriptor {
            &PING
        }
        fn value(&self, field: &str) -> FieldValue<'_> {
            match field {
                "code" => FieldValue::Scalar(self.code.clone()),
                _ => FieldValue::Scalar(None),
            }
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl FromTree for Ping {
        fn descriptor() -> &'static Descriptor {
            &PING
        }
        fn from_raw(raw: RawRecord<'_>) -> WireResult<Self> {
            Ok(Self {
                code: raw.text("code").map(String::from),
            })
        }
    }

    fn ping_descriptor() -> &'static Descriptor {
        &PING
    }

    static PING_V1: MessageSpec = MessageSpec {
        code: "TST0001",
        version: "1.0",
        descriptor: ping_descriptor,
        decode: decode_boxed::<Ping>,
    };

    static PING_V2: MessageSpec = MessageSpec {
        code: "TST0001",
        version: "2.0",
        descriptor: ping_descriptor,
        decode: decode_boxed::<Ping>,
    };

    #[test]
    fn first_registered_version_becomes_the_default() {
        let registry = Registry::new();
        registry.register(&PING_V1);
        registry.register(&PING_V2);

        let spec = registry.resolve("TST0001", None).unwrap();
        assert_eq!(spec.version, "1.0");
        assert_eq!(registry.default_version("TST0001"), Some("1.0".to_string()));

        let spec = registry.resolve("TST0001", Some("2.0")).unwrap();
        assert_eq!(spec.version, "2.0");
    }

    #[test]
    fn codes_are_case_normalized() {
        let registry = Registry::new();
        registry.register(&PING_V1);
        assert!(registry.resolve("tst0001", Some("1.0")).is_ok());
        assert!(registry.resolve(" TST0001 ", None).is_ok());
    }

    #[test]
    fn unknown_code_has_no_default_version() {
        let registry = Registry::new();
        assert_eq!(
            registry.resolve("STR9999", None).unwrap_err(),
            WireError::no_default_version("STR9999")
        );
    }

    #[test]
    fn unknown_version_is_not_implemented() {
        let registry = Registry::new();
        registry.register(&PING_V1);
        assert_eq!(
            registry.resolve("TST0001", Some("9.9")).unwrap_err(),
            WireError::not_implemented("TST0001", "9.9")
        );
    }

    #[test_log::test]
    fn load_hook_registers_on_demand_and_not_found_is_swallowed() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        fn hook(hint: &ModuleHint, registry: &Registry) -> LoadOutcome {
            CALLS.fetch_add(1, Ordering::SeqCst);
            if hint.module() == "tst0001" {
                registry.register(&PING_V1);
                LoadOutcome::Loaded
            } else {
                LoadOutcome::NotFound
            }
        }

        let registry = Registry::new();
        registry.install_hook(hook);

        // Unknown module: NotFound is not an error; failure comes from the
        // empty table, not from the hook.
        assert!(matches!(
            registry.resolve("XXX0001", Some("1.0")).unwrap_err(),
            WireError::NotImplemented { .. }
        ));

        // Known module: registered lazily on first resolution.
        let spec = registry.resolve("TST0001", None).unwrap();
        assert_eq!(spec.code, "TST0001");
        assert!(CALLS.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn module_hint_derivation_follows_the_convention() {
        let hint = ModuleHint::derive("STR0005", Some("10.2"));
        assert_eq!(hint.service(), "str");
        assert_eq!(hint.module(), "str0005");
        assert_eq!(hint.qualifier(), "102");
        assert_eq!(hint.to_string(), "str::str0005_102");

        let hint = ModuleHint::derive("STR0005R1", None);
        assert_eq!(hint.service(), "str");
        assert_eq!(hint.module(), "str0005r1");
        assert_eq!(hint.qualifier(), "default");
    }

    #[test]
    fn message_code_is_found_by_scan() {
        let mut doc = Element::new("DOC");
        let sismsg = doc.push_child(Element::new("SISMSG"));
        let msg = sismsg.push_child(Element::new("TST0001"));
        msg.push_child(Element::new("CodMsg")).set_text("TST0001");

        assert_eq!(extract_message_code(&doc).unwrap(), "TST0001");

        let empty = Element::new("DOC");
        assert_eq!(
            extract_message_code(&empty).unwrap_err(),
            WireError::CodeNotFound
        );
    }
}
