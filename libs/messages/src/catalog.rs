//! Registration manifest and registry load hook.
//!
//! The registry derives a module hint from each code it resolves; this
//! manifest maps hint modules to the registration entry points of the
//! catalogue. Hints for modules the catalogue does not ship answer
//! NotFound, which resolution treats as a non-event.

use tracing::debug;

use codec::{LoadOutcome, ModuleHint, Registry};

use crate::{sel, str};

type RegisterFn = fn(&Registry);

const MODULES: [(&str, RegisterFn); 5] = [
    ("str0004", str::str0004::register),
    ("str0005", str::str0005::register),
    ("str0005r1", str::str0005r1::register),
    ("str0008", str::str0008::register),
    ("sel1052", sel::sel1052::register),
];

/// Load hook for [`Registry::install_hook`]: registers the module a hint
/// names, every version included, regardless of the hint's qualifier.
pub fn load_hook(hint: &ModuleHint, registry: &Registry) -> LoadOutcome {
    match MODULES.iter().find(|(module, _)| *module == hint.module()) {
        Some((module, register)) => {
            debug!(module = %module, "registering catalogue module");
            register(registry);
            LoadOutcome::Loaded
        }
        None => LoadOutcome::NotFound,
    }
}

/// Register every catalogue module eagerly.
pub fn register_all(registry: &Registry) {
    for (_, register) in MODULES {
        register(registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shipped_code_resolves_after_eager_registration() {
        let registry = Registry::new();
        register_all(&registry);

        for code in ["STR0004", "STR0005", "STR0005R1", "STR0008", "SEL1052"] {
            let spec = registry.resolve(code, None).unwrap();
            assert_eq!(spec.code, code);
        }
    }

    #[test]
    fn hook_loads_modules_on_demand() {
        let registry = Registry::new();
        registry.install_hook(load_hook);

        // Nothing registered eagerly; the hint derived from the code pulls
        // the module in.
        let spec = registry.resolve("str0005", None).unwrap();
        assert_eq!(spec.code, "STR0005");
        assert_eq!(spec.version, "10.2");
    }

    #[test]
    fn unknown_modules_fall_through_to_dispatch_errors() {
        let registry = Registry::new();
        registry.install_hook(load_hook);

        assert!(matches!(
            registry.resolve("ZZZ9999", None).unwrap_err(),
            codec::WireError::NoDefaultVersion { .. }
        ));
        assert!(matches!(
            registry.resolve("ZZZ9999", Some("1.0")).unwrap_err(),
            codec::WireError::NotImplemented { .. }
        ));
    }
}
