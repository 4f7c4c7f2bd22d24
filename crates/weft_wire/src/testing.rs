//! Fixture types shared by the tests of this crate.

use core::cmp::Ordering;
use core::mem;

use weft_reflect::collections::Collection;
use weft_reflect::info::{ObjectBuilder, TypeDescriptor, TypePath, TypeRef, Typed};
use weft_reflect::registry::{GenericDefinition, TypeCell, TypeRegistry};
use weft_reflect::types;
use weft_reflect::value::{Object, ObjectRef, Value, compare_with, natural_cmp};
use weft_reflect::{ValueError, submit_type};
use weft_utils::hash::HashSet;

// -----------------------------------------------------------------------------
// Plain objects

pub fn else_type() -> TypeRef {
    static CELL: TypeCell = TypeCell::new();
    CELL.get_or_register(|| {
        ObjectBuilder::new("weft_wire::testing::Else", "weft_wire")
            .field("name", String::type_descriptor())
            .ordering(by_name)
            .build()
    })
}

pub fn something() -> TypeRef {
    static CELL: TypeCell = TypeCell::new();
    CELL.get_or_register(|| {
        ObjectBuilder::new("weft_wire::testing::Something", "weft_wire")
            .field("bool_prop", bool::type_descriptor())
            .field("int32_prop", i32::type_descriptor())
            .field("string_prop", String::type_descriptor())
            .field("else", else_type())
            .build()
    })
}

submit_type!(else_type);

fn by_name(this: &Object, other: &Value) -> Ordering {
    let name = |object: Option<&Object>| object.and_then(|o| o.get("name")).unwrap_or_default();
    natural_cmp(&name(Some(this)), &name(other.as_object().map(|o| &**o)))
}
submit_type!(something);

pub fn new_else(name: &str) -> Value {
    ObjectRef::with_fields(else_type(), [("name", Value::from(name))])
        .map(Value::Object)
        .unwrap()
}

pub fn new_something(flag: bool, number: i32, text: &str, else_name: &str) -> Value {
    ObjectRef::with_fields(
        something(),
        [
            ("bool_prop", Value::Bool(flag)),
            ("int32_prop", Value::I32(number)),
            ("string_prop", Value::from(text)),
            ("else", new_else(else_name)),
        ],
    )
    .map(Value::Object)
    .unwrap()
}

/// A singly linked node whose successor may be anything.
pub fn node() -> TypeRef {
    static CELL: TypeCell = TypeCell::new();
    CELL.get_or_register(|| {
        ObjectBuilder::new("weft_wire::testing::Node", "weft_wire")
            .field("label", String::type_descriptor())
            .field("next", types::any())
            .build()
    })
}

pub fn new_node(label: &str) -> ObjectRef {
    ObjectRef::with_fields(node(), [("label", Value::from(label))]).unwrap()
}

// -----------------------------------------------------------------------------
// Generic fixtures

/// Container-typed fields declared through contracts, so the concrete
/// container kind only shows up at runtime.
pub static TEST_CLASS: GenericDefinition =
    GenericDefinition::new("weft_wire::testing::TestClass", "weft_wire", 2, |inst| {
        let (t, u) = (inst.args()[0], inst.args()[1]);
        Ok(inst
            .object()
            .field("dictionary", types::map_contract_of(i32::type_descriptor(), t))
            .field("list", types::sequence_of(u))
            .field("queue", types::sequence_of(u))
            .field("stack", types::sequence_of(u))
            .field("sorted_set", types::set_contract_of(u))
            .field("hash_set", types::set_contract_of(u))
            .field("fixed", types::sequence_of(u))
            .field("raw", types::array_of(u))
            .build())
    });

pub static CONTAINER_CONTRACT: GenericDefinition =
    GenericDefinition::new("weft_wire::testing::IContainer", "weft_wire", 1, |inst| {
        Ok(inst.contract())
    });

/// Holds one value and orders by it.
pub static CONTAINER: GenericDefinition =
    GenericDefinition::new("weft_wire::testing::Container", "weft_wire", 1, |inst| {
        Ok(inst
            .object()
            .field("value", inst.args()[0])
            .ordering(container_order)
            .build())
    });

/// Orders containers by their values, through an inner comparer.
pub static CONTAINER_COMPARER: GenericDefinition =
    GenericDefinition::new("weft_wire::testing::ContainerComparer", "weft_wire", 1, |inst| {
        Ok(inst
            .object()
            .field("inner", types::comparer_of(inst.args()[0]))
            .comparer(compare_containers)
            .build())
    });

/// Reverses the natural order.
pub static REVERSE_COMPARER: GenericDefinition =
    GenericDefinition::new("weft_wire::testing::ReverseComparer", "weft_wire", 1, |inst| {
        Ok(inst.object().comparer(reverse).build())
    });

submit_type!(generic TEST_CLASS);
submit_type!(generic CONTAINER_CONTRACT);
submit_type!(generic CONTAINER);
submit_type!(generic CONTAINER_COMPARER);
submit_type!(generic REVERSE_COMPARER);

fn contained(value: &Value) -> Value {
    value
        .as_object()
        .and_then(|object| object.get("value"))
        .unwrap_or_default()
}

fn container_order(this: &Object, other: &Value) -> Ordering {
    natural_cmp(&this.get("value").unwrap_or_default(), &contained(other))
}

fn compare_containers(comparer: &Object, left: &Value, right: &Value) -> Ordering {
    let inner = comparer.get("inner").unwrap_or_default();
    compare_with(&inner, &contained(left), &contained(right))
}

fn reverse(_: &Object, left: &Value, right: &Value) -> Ordering {
    natural_cmp(right, left)
}

pub fn instantiate(definition: &GenericDefinition, args: &[TypeRef]) -> TypeRef {
    TypeRegistry::global().instantiate(definition, args).unwrap()
}

pub fn new_container(element: TypeRef, value: Value) -> Value {
    let ty = instantiate(&CONTAINER, &[element]);
    ObjectRef::with_fields(ty, [("value", value)])
        .map(Value::Object)
        .unwrap()
}

pub fn new_object(ty: TypeRef) -> Value {
    Value::Object(ObjectRef::zeroed(ty).unwrap())
}

// -----------------------------------------------------------------------------
// Opaque handle with a surrogate

pub fn handle() -> TypeRef {
    static CELL: TypeCell = TypeCell::new();
    CELL.get_or_register(|| {
        TypeDescriptor::opaque(TypePath::new("weft_wire::testing::Handle", "weft_wire"))
    })
}

pub fn handle_surrogate() -> TypeRef {
    static CELL: TypeCell = TypeCell::new();
    CELL.get_or_register(|| {
        ObjectBuilder::new("weft_wire::testing::HandleSurrogate", "weft_wire")
            .field("id", u64::type_descriptor())
            .build()
    })
}

submit_type!(handle_surrogate);

pub fn handle_to_surrogate(value: &Value) -> Result<Value, ValueError> {
    let id = value
        .as_opaque()
        .and_then(|opaque| opaque.downcast_ref::<u64>())
        .copied()
        .unwrap_or_default();
    ObjectRef::with_fields(handle_surrogate(), [("id", Value::U64(id))]).map(Value::Object)
}

pub fn handle_from_surrogate(value: Value) -> Result<Value, ValueError> {
    let id = value
        .as_object()
        .and_then(|object| object.get("id"))
        .and_then(|id| id.as_u64())
        .unwrap_or_default();
    weft_reflect::value::OpaqueRef::new(handle(), id).map(Value::Opaque)
}

// -----------------------------------------------------------------------------
// Deep equivalence

/// Structural equality of two graphs.
///
/// Primitives compare by value, everything else by runtime type and
/// contents. A pair of reference values already under comparison counts as
/// equal, which terminates cycles.
pub fn deep_eq(left: &Value, right: &Value) -> bool {
    Equivalence::default().eq(left, right)
}

#[derive(Default)]
struct Equivalence {
    visited: HashSet<(usize, usize)>,
}

impl Equivalence {
    fn eq(&mut self, left: &Value, right: &Value) -> bool {
        if let (Some(a), Some(b)) = (left.identity(), right.identity())
            && !self.visited.insert((a, b))
        {
            return true;
        }
        match (left, right) {
            (Value::Null, Value::Null) => true,
            (Value::Object(a), Value::Object(b)) => {
                core::ptr::eq(a.ty(), b.ty()) && self.all(&a.values(), &b.values())
            }
            (Value::Array(a), Value::Array(b)) => {
                core::ptr::eq(a.ty(), b.ty()) && self.all(&a.to_vec(), &b.to_vec())
            }
            (Value::Collection(a), Value::Collection(b)) => {
                core::ptr::eq(a.ty(), b.ty()) && self.all(&contents(a), &contents(b))
            }
            (Value::Opaque(a), Value::Opaque(b)) => {
                core::ptr::eq(a.ty(), b.ty())
                    && a.downcast_ref::<u64>() == b.downcast_ref::<u64>()
            }
            (a, b) => {
                a.primitive().is_some()
                    && mem::discriminant(a) == mem::discriminant(b)
                    && natural_cmp(a, b) == Ordering::Equal
            }
        }
    }

    fn all(&mut self, left: &[Value], right: &[Value]) -> bool {
        left.len() == right.len() && left.iter().zip(right).all(|(a, b)| self.eq(a, b))
    }
}

/// Contents in traversal order; map entries flattened, the sorted set
/// comparer first.
fn contents(collection: &Collection) -> Vec<Value> {
    match collection {
        Collection::List(c) => c.iter().cloned().collect(),
        Collection::Stack(c) => c.iter().cloned().collect(),
        Collection::Queue(c) => c.iter().cloned().collect(),
        Collection::HashSet(c) => c.iter().cloned().collect(),
        Collection::SortedSet(c) => core::iter::once(c.comparer().clone())
            .chain(c.iter().cloned())
            .collect(),
        Collection::Map(c) => c
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect(),
        Collection::Array(c) => c.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use weft_reflect::collections::ImmutableList;

    use super::*;

    #[test]
    fn deep_eq_compares_structure() {
        assert!(deep_eq(
            &new_something(true, 1, "a", "b"),
            &new_something(true, 1, "a", "b")
        ));
        assert!(!deep_eq(
            &new_something(true, 1, "a", "b"),
            &new_something(true, 1, "a", "c")
        ));
        assert!(!deep_eq(&Value::I32(1), &Value::I64(1)));

        let list = |items: Vec<Value>| Value::from(ImmutableList::of(types::any(), items));
        assert!(deep_eq(
            &list(vec![Value::Null, new_else("x")]),
            &list(vec![Value::Null, new_else("x")])
        ));
        assert!(!deep_eq(&list(vec![new_else("x")]), &list(vec![])));
    }

    #[test]
    fn deep_eq_terminates_on_cycles() {
        let a = new_node("n");
        a.set("next", Value::Object(a.clone())).unwrap();
        let b = new_node("n");
        b.set("next", Value::Object(b.clone())).unwrap();
        assert!(deep_eq(&Value::Object(a), &Value::Object(b)));
    }

    #[test]
    fn container_comparer_delegates_to_inner() {
        let element = String::type_descriptor();
        let inner = new_object(instantiate(&REVERSE_COMPARER, &[element]));
        let comparer_ty = instantiate(&CONTAINER_COMPARER, &[element]);
        let comparer = ObjectRef::with_fields(comparer_ty, [("inner", inner)]).unwrap();

        let low = new_container(element, "a".into());
        let high = new_container(element, "b".into());
        assert_eq!(
            compare_with(&Value::Object(comparer), &low, &high),
            Ordering::Greater
        );
        assert_eq!(natural_cmp(&low, &high), Ordering::Less);
    }
}
