//! Named test cases and their providers

use std::fmt;
use std::sync::Arc;
use varaccess_core::{supported, ErrorKind, VarType};
use varaccess_handle::{element, no_coords, receiver, Lookup, VarHandle};
use varaccess_storage::{ClassDef, FieldScope, Instance, IntArray};

use crate::check::{check_flag, check_value, expect_error, CheckResult, Observe};
use crate::fixture::{
    AccessFixture, ARRAY_LENGTH, FIELD, FINAL_FIELD, FINAL_INITIAL, STATIC_FIELD,
    STATIC_FINAL_FIELD,
};
use crate::scenarios::{self, ScenarioContext, SEQUENCE_RESULT};

/// Something the runner can drive through INIT, EXECUTE and VERIFY
pub trait Scenario {
    /// Human-readable description
    fn description(&self) -> &str;

    /// Whether the body must repeat for the configured iteration count
    fn requires_loop(&self) -> bool;

    /// Establish preconditions before the first execution
    fn init(&self) -> CheckResult {
        Ok(())
    }

    /// Run the body once
    fn execute(&self, ctx: &ScenarioContext) -> CheckResult;

    /// Check the state left behind after the last execution
    fn verify(&self) -> CheckResult {
        Ok(())
    }
}

/// Body taking a receiver
pub type ReceiverBody = fn(&Instance, &VarHandle, &ScenarioContext) -> CheckResult;

/// Body needing only the handle
pub type UnboundBody = fn(&VarHandle, &ScenarioContext) -> CheckResult;

/// Body walking the elements of an array
pub type ArrayBody = fn(&IntArray, &VarHandle, &ScenarioContext) -> CheckResult;

/// How an [`AccessTestCase`] invokes its body
#[derive(Clone)]
pub enum ScenarioBody {
    /// Instance-field scenario with its receiver
    Receiver {
        /// Receiver passed to the body
        recv: Instance,
        /// Body
        run: ReceiverBody,
    },
    /// Array scenario over an array the case owns
    Array {
        /// Array passed to the body
        array: IntArray,
        /// Body
        run: ArrayBody,
    },
    /// Static-field scenario, or one that brings its own storage
    Unbound(UnboundBody),
}

/// A named scenario over one handle
#[derive(Clone)]
pub struct AccessTestCase {
    description: String,
    handle: VarHandle,
    body: ScenarioBody,
    requires_loop: bool,
    /// Value the location must still hold once the scenario completes
    expect_after: Option<i32>,
}

impl AccessTestCase {
    /// A case that repeats for the configured iteration count
    pub fn new(description: impl Into<String>, handle: &VarHandle, body: ScenarioBody) -> Self {
        Self {
            description: description.into(),
            handle: handle.clone(),
            body,
            requires_loop: true,
            expect_after: None,
        }
    }

    /// Run once instead of repeating
    pub fn once(mut self) -> Self {
        self.requires_loop = false;
        self
    }

    /// Require the location to hold `value` after the last execution
    ///
    /// For an array case every element must hold it.
    pub fn expect_after(mut self, value: i32) -> Self {
        self.expect_after = Some(value);
        self
    }

    /// Handle under test
    pub fn handle(&self) -> &VarHandle {
        &self.handle
    }
}

impl Scenario for AccessTestCase {
    fn description(&self) -> &str {
        &self.description
    }

    fn requires_loop(&self) -> bool {
        self.requires_loop
    }

    fn init(&self) -> CheckResult {
        let expected = supported(self.handle.shape(), self.handle.mutability());
        check_value(
            "capability set size",
            self.handle.supported_modes().len() as i32,
            expected.len() as i32,
        )?;
        check_flag(
            "capability set matches table",
            self.handle.supported_modes() == expected,
            true,
        )
    }

    fn execute(&self, ctx: &ScenarioContext) -> CheckResult {
        match &self.body {
            ScenarioBody::Receiver { recv, run } => run(recv, &self.handle, ctx),
            ScenarioBody::Array { array, run } => run(array, &self.handle, ctx),
            ScenarioBody::Unbound(run) => run(&self.handle, ctx),
        }
    }

    fn verify(&self) -> CheckResult {
        let Some(expected) = self.expect_after else {
            return Ok(());
        };
        match &self.body {
            ScenarioBody::Receiver { recv, .. } => {
                let observed = self.handle.get(&receiver(recv)).observe("get after scenario")?;
                check_value("value after scenario", observed, expected)
            }
            ScenarioBody::Array { array, .. } => {
                for i in 0..array.len() as i32 {
                    let what = format!("element {} after scenario", i);
                    let observed = self.handle.get(&element(array, i)).observe(&what)?;
                    check_value(&what, observed, expected)?;
                }
                Ok(())
            }
            ScenarioBody::Unbound(_) => {
                let observed = self.handle.get(&no_coords()).observe("get after scenario")?;
                check_value("value after scenario", observed, expected)
            }
        }
    }
}

impl fmt::Display for AccessTestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.handle)
    }
}

impl fmt::Debug for AccessTestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTestCase")
            .field("description", &self.description)
            .field("handle", &self.handle)
            .field("requires_loop", &self.requires_loop)
            .finish()
    }
}

/// A binding request that must cross the instance/static boundary and fail
#[derive(Debug, Clone)]
pub struct LookupTestCase {
    description: &'static str,
    class: Arc<ClassDef>,
    field: &'static str,
    requested: FieldScope,
}

impl LookupTestCase {
    /// Request `field` of `class` as a `requested`-scoped field
    pub fn new(
        description: &'static str,
        class: &Arc<ClassDef>,
        field: &'static str,
        requested: FieldScope,
    ) -> Self {
        Self {
            description,
            class: Arc::clone(class),
            field,
            requested,
        }
    }
}

impl Scenario for LookupTestCase {
    fn description(&self) -> &str {
        self.description
    }

    fn requires_loop(&self) -> bool {
        false
    }

    fn execute(&self, _ctx: &ScenarioContext) -> CheckResult {
        let lookup = Lookup::new();
        let result = match self.requested {
            FieldScope::Instance => lookup.find_var_handle(&self.class, self.field, VarType::Int),
            FieldScope::Static => {
                lookup.find_static_var_handle(&self.class, self.field, VarType::Int)
            }
        };
        expect_error(self.description, result, ErrorKind::Binding)
    }
}

/// The access scenarios over every fixture handle
///
/// Unsupported-mode and bounds cases run once; the rest repeat.
pub fn access_test_cases(fx: &AccessFixture) -> Vec<AccessTestCase> {
    use ScenarioBody::{Array, Receiver, Unbound};

    let recv = || fx.receiver.clone();
    vec![
        AccessTestCase::new(
            "Instance final field",
            &fx.vh_final_field,
            Receiver { recv: recv(), run: scenarios::instance_final_field },
        )
        .expect_after(FINAL_INITIAL),
        AccessTestCase::new(
            "Instance final field unsupported",
            &fx.vh_final_field,
            Receiver { recv: recv(), run: scenarios::instance_final_field_unsupported },
        )
        .once()
        .expect_after(FINAL_INITIAL),
        AccessTestCase::new(
            "Static final field",
            &fx.vh_static_final_field,
            Unbound(scenarios::static_final_field),
        )
        .expect_after(FINAL_INITIAL),
        AccessTestCase::new(
            "Static final field unsupported",
            &fx.vh_static_final_field,
            Unbound(scenarios::static_final_field_unsupported),
        )
        .once()
        .expect_after(FINAL_INITIAL),
        AccessTestCase::new(
            "Instance field",
            &fx.vh_field,
            Receiver { recv: recv(), run: scenarios::instance_field },
        )
        .expect_after(SEQUENCE_RESULT),
        AccessTestCase::new(
            "Instance field unsupported",
            &fx.vh_field,
            Receiver { recv: recv(), run: scenarios::instance_field_unsupported },
        )
        .once(),
        AccessTestCase::new("Static field", &fx.vh_static_field, Unbound(scenarios::static_field))
            .expect_after(SEQUENCE_RESULT),
        AccessTestCase::new(
            "Static field unsupported",
            &fx.vh_static_field,
            Unbound(scenarios::static_field_unsupported),
        )
        .once(),
        AccessTestCase::new(
            "Array",
            &fx.vh_array,
            Array { array: IntArray::new(ARRAY_LENGTH), run: scenarios::array },
        )
        .expect_after(SEQUENCE_RESULT),
        AccessTestCase::new(
            "Array unsupported",
            &fx.vh_array,
            Unbound(scenarios::array_unsupported),
        )
        .once(),
        AccessTestCase::new(
            "Array index out of bounds",
            &fx.vh_array,
            Unbound(scenarios::array_index_out_of_bounds),
        )
        .once(),
    ]
}

/// One capability check per fixture handle
pub fn capability_test_cases(fx: &AccessFixture) -> Vec<AccessTestCase> {
    fx.handles()
        .into_iter()
        .map(|vh| {
            AccessTestCase::new(
                format!("Capabilities of {}", vh),
                vh,
                ScenarioBody::Unbound(scenarios::capabilities_match),
            )
            .once()
        })
        .collect()
}

/// Cross-category lookups, all of which must fail
pub fn lookup_test_cases(fx: &AccessFixture) -> Vec<LookupTestCase> {
    vec![
        LookupTestCase::new(
            "Lookup of static final field to instance final field",
            &fx.class,
            FINAL_FIELD,
            FieldScope::Static,
        ),
        LookupTestCase::new(
            "Lookup of static field to instance field",
            &fx.class,
            FIELD,
            FieldScope::Static,
        ),
        LookupTestCase::new(
            "Lookup of instance final field to static final field",
            &fx.class,
            STATIC_FINAL_FIELD,
            FieldScope::Instance,
        ),
        LookupTestCase::new(
            "Lookup of instance field to static field",
            &fx.class,
            STATIC_FIELD,
            FieldScope::Instance,
        ),
    ]
}
