//! ScriptedVm: in-memory VM double
//!
//! Replays canned programs instead of interpreting source. A program is
//! looked up by its exact source text and is a list of [`Step`]s: values
//! passed to `see`, or a script error. The double honors the same seams as
//! a real VM: `see` only reaches a native hook after the rebind source has
//! been run and the hook has been registered under the rebound name.
//!
//! Values are exposed to hooks through [`ValueAccess`] with 1-based
//! indices. Every list reachable from an argument gets a stable
//! [`ListRef`] for the duration of the call.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::context::ValueAccess;
use crate::error::{AbiResult, NativeError};
use crate::handler::{HookRegistry, NativeFn, ScriptVm, VmFactory};
use crate::value::ListRef;

/// A value a scripted program prints.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedValue {
    /// String
    Str(String),
    /// Number
    Num(f64),
    /// List
    List(Vec<ScriptedValue>),
    /// List tag with a null handle
    NullList,
    /// Object instance (reported as a pointer)
    Object,
    /// A value the accessor API has no predicate for
    Unknown,
}

impl ScriptedValue {
    /// Build a string value
    pub fn str(s: &str) -> Self {
        ScriptedValue::Str(s.to_string())
    }

    /// Build a list value
    pub fn list(items: impl IntoIterator<Item = ScriptedValue>) -> Self {
        ScriptedValue::List(items.into_iter().collect())
    }
}

/// One step of a scripted program
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// `see <value>`
    See(ScriptedValue),
    /// Script raises an error; later steps do not run
    Fail(String),
}

/// Counters shared between a factory and the VMs it creates
#[derive(Debug, Default)]
struct Counters {
    created: Cell<usize>,
    released: Cell<usize>,
    unrouted: Cell<usize>,
}

/// Factory for [`ScriptedVm`] instances.
#[derive(Clone, Default)]
pub struct ScriptedFactory {
    programs: HashMap<String, Vec<Step>>,
    rebind_source: String,
    see_target: String,
    fail_init: bool,
    reject_hooks: bool,
    counters: Rc<Counters>,
}

impl ScriptedFactory {
    /// Create a factory whose VMs route `see` to `see_target` once
    /// `rebind_source` has been run.
    pub fn new(rebind_source: &str, see_target: &str) -> Self {
        Self {
            rebind_source: rebind_source.to_string(),
            see_target: see_target.to_string(),
            ..Self::default()
        }
    }

    /// Add a program, keyed by its exact source text
    pub fn program(mut self, source: &str, steps: Vec<Step>) -> Self {
        self.programs.insert(source.to_string(), steps);
        self
    }

    /// Make every `init` call fail
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Make every hook registration fail
    pub fn rejecting_hooks(mut self) -> Self {
        self.reject_hooks = true;
        self
    }

    /// Number of VMs created so far
    pub fn created(&self) -> usize {
        self.counters.created.get()
    }

    /// Number of VMs released so far
    pub fn released(&self) -> usize {
        self.counters.released.get()
    }

    /// Number of `see` calls that reached the VM's own printer instead of a hook
    pub fn unrouted_prints(&self) -> usize {
        self.counters.unrouted.get()
    }
}

impl VmFactory for ScriptedFactory {
    type Vm = ScriptedVm;

    fn init(&self) -> AbiResult<ScriptedVm> {
        if self.fail_init {
            return Err(NativeError::InitFailed("scripted init failure".to_string()));
        }
        self.counters.created.set(self.counters.created.get() + 1);
        Ok(ScriptedVm {
            programs: self.programs.clone(),
            rebind_source: self.rebind_source.clone(),
            see_target: self.see_target.clone(),
            reject_hooks: self.reject_hooks,
            hooks: HookRegistry::new(),
            rebound: false,
            released: false,
            counters: self.counters.clone(),
        })
    }
}

/// A VM that replays canned programs.
pub struct ScriptedVm {
    programs: HashMap<String, Vec<Step>>,
    rebind_source: String,
    see_target: String,
    reject_hooks: bool,
    hooks: HookRegistry,
    rebound: bool,
    released: bool,
    counters: Rc<Counters>,
}

impl ScriptedVm {
    /// Whether `release` has been called
    pub fn is_released(&self) -> bool {
        self.released
    }

    fn see(&self, value: &ScriptedValue) {
        let hook = if self.rebound {
            self.hooks.get(&self.see_target)
        } else {
            None
        };
        match hook {
            Some(hook) => {
                let args = std::slice::from_ref(value);
                let call = ScriptedCall::new(args);
                hook(&call);
            }
            None => self.counters.unrouted.set(self.counters.unrouted.get() + 1),
        }
    }
}

impl ScriptVm for ScriptedVm {
    fn register_function(&mut self, name: &str, hook: NativeFn) -> AbiResult<()> {
        if self.released {
            return Err(NativeError::Released);
        }
        if self.reject_hooks {
            return Err(NativeError::Registration(name.to_string()));
        }
        self.hooks.register(name, hook);
        Ok(())
    }

    fn run_code(&mut self, source: &str) -> AbiResult<()> {
        if self.released {
            return Err(NativeError::Released);
        }
        if source.trim().is_empty() {
            return Ok(());
        }
        if source == self.rebind_source {
            self.rebound = true;
            return Ok(());
        }
        let Some(steps) = self.programs.get(source) else {
            return Err(NativeError::Script(format!("unknown program: {source}")));
        };
        for step in steps {
            match step {
                Step::See(value) => self.see(value),
                Step::Fail(message) => return Err(NativeError::Script(message.clone())),
            }
        }
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.hooks.clear();
        self.counters.released.set(self.counters.released.get() + 1);
    }
}

/// A list reachable from the call's arguments, with the handle of every
/// nested list element.
struct ArenaList<'a> {
    items: &'a [ScriptedValue],
    children: Vec<Option<ListRef>>,
}

/// Argument view handed to hooks.
struct ScriptedCall<'a> {
    args: &'a [ScriptedValue],
    arg_lists: Vec<Option<ListRef>>,
    lists: Vec<ArenaList<'a>>,
}

impl<'a> ScriptedCall<'a> {
    fn new(args: &'a [ScriptedValue]) -> Self {
        let mut call = Self {
            args,
            arg_lists: Vec::with_capacity(args.len()),
            lists: Vec::new(),
        };
        for arg in args {
            let handle = call.intern(arg);
            call.arg_lists.push(handle);
        }
        call
    }

    /// Assign handles to `value` and every list under it, breadth first.
    fn intern(&mut self, value: &'a ScriptedValue) -> Option<ListRef> {
        let ScriptedValue::List(items) = value else {
            return None;
        };
        let root = self.lists.len();
        self.lists.push(ArenaList {
            items,
            children: vec![None; items.len()],
        });
        let mut next = root;
        while next < self.lists.len() {
            let items = self.lists[next].items;
            for (i, item) in items.iter().enumerate() {
                if let ScriptedValue::List(inner) = item {
                    let id = self.lists.len();
                    self.lists.push(ArenaList {
                        items: inner,
                        children: vec![None; inner.len()],
                    });
                    self.lists[next].children[i] = Some(ListRef::from_bits(id as u64));
                }
            }
            next += 1;
        }
        Some(ListRef::from_bits(root as u64))
    }

    fn arg(&self, index: usize) -> Option<&'a ScriptedValue> {
        index.checked_sub(1).and_then(|i| self.args.get(i))
    }

    fn item(&self, list: ListRef, index: usize) -> Option<&'a ScriptedValue> {
        let entry = self.lists.get(list.to_bits() as usize)?;
        index.checked_sub(1).and_then(|i| entry.items.get(i))
    }

    fn child(&self, list: ListRef, index: usize) -> AbiResult<Option<ListRef>> {
        match self.item(list, index) {
            Some(ScriptedValue::List(_)) => Ok(self
                .lists
                .get(list.to_bits() as usize)
                .and_then(|entry| entry.children.get(index - 1).copied().flatten())),
            Some(ScriptedValue::NullList) => Ok(None),
            _ => Err(NativeError::TypeMismatch {
                index,
                expected: "list",
            }),
        }
    }
}

fn as_string(value: Option<&ScriptedValue>, index: usize) -> AbiResult<String> {
    match value {
        Some(ScriptedValue::Str(s)) => Ok(s.clone()),
        _ => Err(NativeError::TypeMismatch {
            index,
            expected: "string",
        }),
    }
}

fn as_number(value: Option<&ScriptedValue>, index: usize) -> AbiResult<f64> {
    match value {
        Some(ScriptedValue::Num(n)) => Ok(*n),
        _ => Err(NativeError::TypeMismatch {
            index,
            expected: "number",
        }),
    }
}

fn is_list_tag(value: Option<&ScriptedValue>) -> bool {
    matches!(
        value,
        Some(ScriptedValue::List(_)) | Some(ScriptedValue::NullList)
    )
}

impl ValueAccess for ScriptedCall<'_> {
    fn is_string(&self, index: usize) -> bool {
        matches!(self.arg(index), Some(ScriptedValue::Str(_)))
    }

    fn is_number(&self, index: usize) -> bool {
        matches!(self.arg(index), Some(ScriptedValue::Num(_)))
    }

    fn is_list(&self, index: usize) -> bool {
        is_list_tag(self.arg(index))
    }

    fn is_pointer(&self, index: usize) -> bool {
        matches!(self.arg(index), Some(ScriptedValue::Object))
    }

    fn get_string(&self, index: usize) -> AbiResult<String> {
        as_string(self.arg(index), index)
    }

    fn get_number(&self, index: usize) -> AbiResult<f64> {
        as_number(self.arg(index), index)
    }

    fn get_list(&self, index: usize) -> AbiResult<Option<ListRef>> {
        match self.arg(index) {
            Some(ScriptedValue::List(_)) => Ok(self.arg_lists[index - 1]),
            Some(ScriptedValue::NullList) => Ok(None),
            _ => Err(NativeError::TypeMismatch {
                index,
                expected: "list",
            }),
        }
    }

    fn list_size(&self, list: ListRef) -> usize {
        self.lists
            .get(list.to_bits() as usize)
            .map_or(0, |entry| entry.items.len())
    }

    fn list_is_string(&self, list: ListRef, index: usize) -> bool {
        matches!(self.item(list, index), Some(ScriptedValue::Str(_)))
    }

    fn list_is_number(&self, list: ListRef, index: usize) -> bool {
        matches!(self.item(list, index), Some(ScriptedValue::Num(_)))
    }

    fn list_is_list(&self, list: ListRef, index: usize) -> bool {
        is_list_tag(self.item(list, index))
    }

    fn list_get_string(&self, list: ListRef, index: usize) -> AbiResult<String> {
        as_string(self.item(list, index), index)
    }

    fn list_get_number(&self, list: ListRef, index: usize) -> AbiResult<f64> {
        as_number(self.item(list, index), index)
    }

    fn list_get_list(&self, list: ListRef, index: usize) -> AbiResult<Option<ListRef>> {
        self.child(list, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::read_arg;
    use crate::variant::Variant;
    use std::cell::RefCell;

    const REBIND: &str = "func ringvm_see cData ring_vm_see(cData)";

    fn capture_into(seen: Rc<RefCell<Vec<Variant>>>) -> NativeFn {
        Rc::new(move |args: &dyn ValueAccess| {
            if let Ok(Some(value)) = read_arg(args, 1) {
                seen.borrow_mut().push(value);
            }
        })
    }

    #[test]
    fn test_see_routes_after_rebind() {
        let factory = ScriptedFactory::new(REBIND, "ring_vm_see").program(
            "see 1",
            vec![Step::See(ScriptedValue::Num(1.0))],
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut vm = factory.init().unwrap();
        vm.register_function("ring_vm_see", capture_into(seen.clone())).unwrap();

        vm.run_code("see 1").unwrap();
        assert!(seen.borrow().is_empty());
        assert_eq!(factory.unrouted_prints(), 1);

        vm.run_code(REBIND).unwrap();
        vm.run_code("see 1").unwrap();
        assert_eq!(*seen.borrow(), vec![Variant::Num(1.0)]);
    }

    #[test]
    fn test_nested_lists_get_handles() {
        let value = ScriptedValue::list([
            ScriptedValue::Num(1.0),
            ScriptedValue::list([ScriptedValue::str("a"), ScriptedValue::NullList]),
            ScriptedValue::Object,
        ]);
        let factory = ScriptedFactory::new(REBIND, "ring_vm_see")
            .program("p", vec![Step::See(value)]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut vm = factory.init().unwrap();
        vm.register_function("ring_vm_see", capture_into(seen.clone())).unwrap();
        vm.run_code(REBIND).unwrap();
        vm.run_code("p").unwrap();

        let expected = Variant::list([
            Variant::from(1),
            Variant::list([Variant::from("a"), Variant::List(Vec::new())]),
        ]);
        assert_eq!(*seen.borrow(), vec![expected]);
    }

    #[test]
    fn test_failures_and_release() {
        let factory = ScriptedFactory::new(REBIND, "ring_vm_see").program(
            "boom",
            vec![
                Step::See(ScriptedValue::str("before")),
                Step::Fail("bad".to_string()),
                Step::See(ScriptedValue::str("after")),
            ],
        );
        let mut vm = factory.init().unwrap();
        assert_eq!(
            vm.run_code("boom"),
            Err(NativeError::Script("bad".to_string()))
        );
        assert!(vm.run_code("missing").is_err());
        assert_eq!(factory.unrouted_prints(), 1);

        vm.release();
        vm.release();
        assert!(vm.is_released());
        assert_eq!(factory.released(), 1);
        assert_eq!(vm.run_code("boom"), Err(NativeError::Released));
    }

    #[test]
    fn test_failing_factory() {
        let factory = ScriptedFactory::new(REBIND, "ring_vm_see").failing_init();
        assert!(matches!(factory.init(), Err(NativeError::InitFailed(_))));
        assert_eq!(factory.created(), 0);

        let factory = ScriptedFactory::new(REBIND, "ring_vm_see").rejecting_hooks();
        let mut vm = factory.init().unwrap();
        let hook: NativeFn = Rc::new(|_args: &dyn ValueAccess| {});
        assert!(matches!(
            vm.register_function("ring_vm_see", hook),
            Err(NativeError::Registration(_))
        ));
    }
}
