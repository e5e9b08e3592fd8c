//! Wire mapping between typed record shapes and sObject JSON.
//!
//! Mapping is driven by an explicit capability, not reflection: a shape
//! implements [`SObjectRecord`] and registers, per wire field, a *paired*
//! getter and setter. Only registered members participate in mapping.
//! Plain struct fields that are not registered are silently skipped, left
//! at their `Default` value when reading and omitted when writing. That
//! asymmetry is deliberate and covered by tests; it mirrors how the wire
//! layer treats non-property members.
//!
//! A wire value whose JSON type does not match the registered property fails
//! with [`ErrorKind::Mapping`] and propagates to the caller uncaught: a shape
//! mismatch is a caller bug, not a server condition, and is never folded into
//! the remote error taxonomy.

use serde_json::Value;

use forcelink_client::{Error, ErrorKind, Result};

/// Capability implemented by record shapes that take part in wire mapping.
///
/// # Example
///
/// ```rust
/// use forcelink_rest::{Properties, SObjectRecord};
///
/// #[derive(Debug, Default, Clone)]
/// struct Account {
///     id: String,
///     name: String,
///     // Not registered below: stays at Default on read, omitted on write.
///     scratch: String,
/// }
///
/// impl SObjectRecord for Account {
///     fn properties() -> Properties<Self> {
///         Properties::new()
///             .text("Id", |a: &Account| Some(a.id.clone()), |a, v| a.id = v)
///             .text("Name", |a| Some(a.name.clone()), |a, v| a.name = v)
///     }
/// }
/// ```
pub trait SObjectRecord: Default {
    /// The registered wire properties of this shape.
    fn properties() -> Properties<Self>;
}

type Getter<T> = Box<dyn Fn(&T) -> Option<Value> + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, &Value) -> Result<()> + Send + Sync>;

/// One registered wire member: a field name plus paired read/write access.
pub struct Property<T> {
    name: &'static str,
    get: Getter<T>,
    set: Setter<T>,
}

impl<T> Property<T> {
    /// The wire field name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The registered wire properties of a record shape.
pub struct Properties<T> {
    entries: Vec<Property<T>>,
}

impl<T: 'static> Default for Properties<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Properties<T> {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a string-valued property.
    pub fn text(
        self,
        name: &'static str,
        get: fn(&T) -> Option<String>,
        set: fn(&mut T, String),
    ) -> Self {
        self.custom(
            name,
            move |record| get(record).map(Value::String),
            move |record, value| match value {
                Value::String(s) => {
                    set(record, s.clone());
                    Ok(())
                }
                other => Err(type_mismatch(name, "string", other)),
            },
        )
    }

    /// Register a boolean-valued property.
    pub fn boolean(
        self,
        name: &'static str,
        get: fn(&T) -> Option<bool>,
        set: fn(&mut T, bool),
    ) -> Self {
        self.custom(
            name,
            move |record| get(record).map(Value::Bool),
            move |record, value| match value {
                Value::Bool(b) => {
                    set(record, *b);
                    Ok(())
                }
                other => Err(type_mismatch(name, "boolean", other)),
            },
        )
    }

    /// Register a numeric property.
    pub fn number(
        self,
        name: &'static str,
        get: fn(&T) -> Option<f64>,
        set: fn(&mut T, f64),
    ) -> Self {
        self.custom(
            name,
            move |record| get(record).and_then(serde_json::Number::from_f64).map(Value::Number),
            move |record, value| match value.as_f64() {
                Some(n) => {
                    set(record, n);
                    Ok(())
                }
                None => Err(type_mismatch(name, "number", value)),
            },
        )
    }

    /// Register a property with caller-supplied conversions.
    pub fn custom(
        mut self,
        name: &'static str,
        get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
        set: impl Fn(&mut T, &Value) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.entries.push(Property {
            name,
            get: Box::new(get),
            set: Box::new(set),
        });
        self
    }

    /// Iterate the registered wire field names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|p| p.name)
    }

    /// Number of registered properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no properties are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Materialize a record shape from a wire JSON object.
///
/// Starts from `T::default()` and runs the setter of every registered
/// property that is present and non-null in the object. JSON members with no
/// registered property are silently skipped.
pub fn from_json<T: SObjectRecord>(value: &Value) -> Result<T> {
    let Some(object) = value.as_object() else {
        return Err(Error::new(ErrorKind::Mapping {
            field: "<record>".to_string(),
            detail: format!("expected object, found {}", json_type_name(value)),
        }));
    };

    let mut record = T::default();
    for property in T::properties().entries {
        match object.get(property.name) {
            None | Some(Value::Null) => {}
            Some(value) => (property.set)(&mut record, value)?,
        }
    }
    Ok(record)
}

/// Collect a record shape's registered getters into a [`FieldMap`].
///
/// Getters that yield `None` are omitted, as is every unregistered member.
pub fn to_field_map<T: SObjectRecord>(record: &T) -> FieldMap {
    let mut map = FieldMap::new();
    for property in T::properties().entries {
        if let Some(value) = (property.get)(record) {
            map.set(property.name, value);
        }
    }
    map
}

/// A fluent field-name/value accumulator used as the create/update payload.
///
/// # Example
///
/// ```rust
/// use forcelink_rest::FieldMap;
///
/// let payload = FieldMap::new()
///     .field("Name", "Acme Corp")
///     .field("NumberOfEmployees", 250);
/// ```
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: serde_json::Map<String, Value>,
}

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, consuming and returning the map.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add a field in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the map holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Conversion into the wire payload for create/update calls.
///
/// Implemented by [`FieldMap`] itself and by references to any
/// [`SObjectRecord`], so both ad-hoc payloads and typed shapes are accepted.
pub trait IntoFieldMap {
    fn into_field_map(self) -> FieldMap;
}

impl IntoFieldMap for FieldMap {
    fn into_field_map(self) -> FieldMap {
        self
    }
}

impl<T: SObjectRecord> IntoFieldMap for &T {
    fn into_field_map(self) -> FieldMap {
        to_field_map(self)
    }
}

fn type_mismatch(field: &'static str, expected: &str, found: &Value) -> Error {
    Error::new(ErrorKind::Mapping {
        field: field.to_string(),
        detail: format!("expected {expected}, found {}", json_type_name(found)),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Account {
        id: String,
        name: String,
        active: bool,
        employees: Option<f64>,
        // Bare data member: no registered property.
        internal_note: String,
    }

    impl SObjectRecord for Account {
        fn properties() -> Properties<Self> {
            Properties::new()
                .text("Id", |a: &Account| Some(a.id.clone()), |a, v| a.id = v)
                .text("Name", |a| Some(a.name.clone()), |a, v| a.name = v)
                .boolean("Active__c", |a| Some(a.active), |a, v| a.active = v)
                .number(
                    "NumberOfEmployees",
                    |a| a.employees,
                    |a, v| a.employees = Some(v),
                )
        }
    }

    /// Same wire fields, but nothing registered: the bag-of-fields shape.
    #[derive(Debug, Default)]
    struct BareAccount {
        #[allow(dead_code)]
        id: String,
        #[allow(dead_code)]
        name: String,
    }

    impl SObjectRecord for BareAccount {
        fn properties() -> Properties<Self> {
            Properties::new()
        }
    }

    fn account_json() -> Value {
        json!({
            "attributes": {"type": "Account", "url": "/services/data/v62.0/sobjects/Account/001xx"},
            "Id": "001xx000003DgAAAS",
            "Name": "Acme Corp",
            "Active__c": true,
            "NumberOfEmployees": 250,
            "internal_note": "never mapped"
        })
    }

    #[test]
    fn test_from_json_populates_registered_properties() {
        let account: Account = from_json(&account_json()).unwrap();
        assert_eq!(account.id, "001xx000003DgAAAS");
        assert_eq!(account.name, "Acme Corp");
        assert!(account.active);
        assert_eq!(account.employees, Some(250.0));
    }

    #[test]
    fn test_from_json_skips_unregistered_members() {
        // The wire object carries "internal_note" but no property is
        // registered for it: the member stays at its default.
        let account: Account = from_json(&account_json()).unwrap();
        assert_eq!(account.internal_note, "");
    }

    #[test]
    fn test_bare_shape_maps_to_defaults() {
        // Identical input JSON, different mapping outcome: a shape with no
        // registered properties comes back all-default.
        let bare: BareAccount = from_json(&account_json()).unwrap();
        assert_eq!(bare.id, "");
        assert_eq!(bare.name, "");
    }

    #[test]
    fn test_from_json_missing_and_null_members_stay_default() {
        let account: Account = from_json(&json!({"Name": "Only Name", "Id": null})).unwrap();
        assert_eq!(account.name, "Only Name");
        assert_eq!(account.id, "");
        assert!(!account.active);
        assert_eq!(account.employees, None);
    }

    #[test]
    fn test_type_mismatch_propagates() {
        // Boolean wire value into a string-typed property.
        let result: Result<Account> = from_json(&json!({"Name": true}));
        let err = result.unwrap_err();
        match err.kind {
            ErrorKind::Mapping {
                ref field,
                ref detail,
            } => {
                assert_eq!(field, "Name");
                assert!(detail.contains("expected string"));
                assert!(detail.contains("boolean"));
            }
            other => panic!("expected Mapping, got {other:?}"),
        }

        // And the reverse: string wire value into a boolean property.
        let result: Result<Account> = from_json(&json!({"Active__c": "yes"}));
        assert!(matches!(
            result.unwrap_err().kind,
            ErrorKind::Mapping { .. }
        ));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let result: Result<Account> = from_json(&json!(["not", "an", "object"]));
        let err = result.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Mapping { .. }));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_to_field_map_collects_registered_getters() {
        let account = Account {
            id: "001xx".into(),
            name: "Acme Corp".into(),
            active: true,
            employees: Some(250.0),
            internal_note: "not on the wire".into(),
        };

        let map = to_field_map(&account);
        assert_eq!(map.get("Name"), Some(&json!("Acme Corp")));
        assert_eq!(map.get("Active__c"), Some(&json!(true)));
        assert_eq!(map.get("NumberOfEmployees"), Some(&json!(250.0)));
        // Unregistered member omitted on write.
        assert_eq!(map.get("internal_note"), None);
    }

    #[test]
    fn test_to_field_map_omits_none_getters() {
        let account = Account {
            name: "No Headcount".into(),
            ..Default::default()
        };
        let map = to_field_map(&account);
        assert_eq!(map.get("NumberOfEmployees"), None);
    }

    #[test]
    fn test_field_map_serializes_flat() {
        let payload = FieldMap::new()
            .field("Name", "Acme Corp")
            .field("NumberOfEmployees", 250);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            json!({"Name": "Acme Corp", "NumberOfEmployees": 250})
        );
    }

    #[test]
    fn test_into_field_map_for_records_and_maps() {
        fn payload_of(input: impl IntoFieldMap) -> FieldMap {
            input.into_field_map()
        }

        let from_map = payload_of(FieldMap::new().field("Name", "Ad Hoc"));
        assert_eq!(from_map.get("Name"), Some(&json!("Ad Hoc")));

        let account = Account {
            name: "Typed".into(),
            ..Default::default()
        };
        let from_record = payload_of(&account);
        assert_eq!(from_record.get("Name"), Some(&json!("Typed")));
    }

    #[test]
    fn test_property_names() {
        let names: Vec<_> = Account::properties().names().collect();
        assert_eq!(names, ["Id", "Name", "Active__c", "NumberOfEmployees"]);
        assert_eq!(Account::properties().len(), 4);
        assert!(BareAccount::properties().is_empty());
    }
}
