use core::fmt;

#[cfg(feature = "chrono")]
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

use crate::codec::JsonObject;
use crate::info::{ClassDescriptor, FieldDescriptor, MethodDescriptor};
use crate::info::{ParameterDescriptor, TypeDescriptor, TypeIdent};
use crate::{Describe, Entries, FromValue, Mappable, Value, View};

macro_rules! field {
    ($owner:ty, $name:literal, $member:ident, $ty:expr) => {
        FieldDescriptor::new(
            $name,
            $ty,
            |owner: &$owner| &owner.$member,
            |owner: &mut $owner, value| owner.$member = value,
        )
    };
}

// -----------------------------------------------------------------------------
// Push subscription

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Keys {
    pub p256dh: String,
    pub auth: String,
}

impl Describe for Keys {
    const NAME: &'static str = "Keys";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(Keys, "p256dh", p256dh, TypeDescriptor::string()))
            .field(field!(Keys, "auth", auth, TypeDescriptor::string()))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Subscription {
    pub endpoint: String,
    pub keys: Keys,
}

impl Describe for Subscription {
    const NAME: &'static str = "Subscription";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(Subscription, "endpoint", endpoint, TypeDescriptor::string()))
            .field(field!(Subscription, "keys", keys, TypeDescriptor::of::<Keys>()))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct DeviceInfo {
    pub device_type: String,
    pub device_brand: String,
    pub device_model: String,
    pub browser_name: String,
    pub browser_version: String,
    pub os_name: String,
    pub os_version: String,
}

impl Describe for DeviceInfo {
    const NAME: &'static str = "DeviceInfo";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(DeviceInfo, "deviceType", device_type, TypeDescriptor::string()))
            .field(field!(DeviceInfo, "deviceBrand", device_brand, TypeDescriptor::string()))
            .field(field!(DeviceInfo, "deviceModel", device_model, TypeDescriptor::string()))
            .field(field!(DeviceInfo, "browserName", browser_name, TypeDescriptor::string()))
            .field(field!(DeviceInfo, "browserVersion", browser_version, TypeDescriptor::string()))
            .field(field!(DeviceInfo, "osName", os_name, TypeDescriptor::string()))
            .field(field!(DeviceInfo, "osVersion", os_version, TypeDescriptor::string()))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Message {
    pub username: String,
    pub content: String,
}

impl Describe for Message {
    const NAME: &'static str = "Message";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(Message, "username", username, TypeDescriptor::string()))
            .field(field!(Message, "content", content, TypeDescriptor::string()))
            .build()
    }
}

#[cfg(feature = "chrono")]
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct User {
    pub id: String,
    pub subscription: Subscription,
    pub subscribed_times: i64,
    pub active: bool,
    pub payout: f64,
    pub user_agent: String,
    pub device_info: DeviceInfo,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub description: String,
    pub title: Option<String>,
    pub messages: Vec<Message>,
    pub groups: Option<Vec<String>>,
}

#[cfg(feature = "chrono")]
impl Describe for User {
    const NAME: &'static str = "User";

    fn describe() -> ClassDescriptor {
        let date = || TypeDescriptor::of::<DateTime<FixedOffset>>();

        ClassDescriptor::builder::<Self>()
            .field(field!(User, "subscription", subscription, TypeDescriptor::of::<Subscription>()))
            .field(field!(User, "subscribedTimes", subscribed_times, TypeDescriptor::int()))
            .field(field!(User, "active", active, TypeDescriptor::bool()))
            .field(field!(User, "payout", payout, TypeDescriptor::float()))
            .field(field!(User, "userAgent", user_agent, TypeDescriptor::string()))
            .field(field!(User, "deviceInfo", device_info, TypeDescriptor::of::<DeviceInfo>()))
            .field(field!(User, "createdAt", created_at, date()))
            .field(field!(User, "updatedAt", updated_at, date()))
            .field(field!(User, "description", description, TypeDescriptor::string()).rename("body"))
            .field(field!(User, "title", title, TypeDescriptor::string().nullable()))
            .field(
                field!(User, "messages", messages, TypeDescriptor::array())
                    .element(TypeDescriptor::of::<Message>()),
            )
            .field(field!(User, "groups", groups, TypeDescriptor::array().nullable()))
            .field(FieldDescriptor::hidden("_id", TypeDescriptor::string()).rename("id"))
            .method(MethodDescriptor::setter(
                "setId",
                ParameterDescriptor::new("id", TypeDescriptor::string()),
                |user: &mut User, id: String| user.id = id,
            ))
            .method(MethodDescriptor::getter("get_id", |user: &User| user.id.clone()))
            .build()
    }
}

/// Plain camelCase fields read from snake_case keys.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Visit {
    pub subscribed_times: i64,
    pub user_agent: String,
}

impl Describe for Visit {
    const NAME: &'static str = "Visit";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(Visit, "subscribedTimes", subscribed_times, TypeDescriptor::int()))
            .field(field!(Visit, "userAgent", user_agent, TypeDescriptor::string()))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Retry {
    pub attempts: u8,
}

impl Describe for Retry {
    const NAME: &'static str = "Retry";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(Retry, "attempts", attempts, TypeDescriptor::int()))
            .build()
    }
}

// -----------------------------------------------------------------------------
// Setters

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithCustomSetter {
    pub keys: Option<Keys>,
    pub request_number: i64,
    pub company: String,
    pub req_id: String,
}

impl Describe for ModelWithCustomSetter {
    const NAME: &'static str = "ModelWithCustomSetter";

    fn describe() -> ClassDescriptor {
        type Model = ModelWithCustomSetter;

        ClassDescriptor::builder::<Self>()
            .field(field!(Model, "keys", keys, TypeDescriptor::of::<Keys>().nullable()))
            .field(field!(Model, "requestNumber", request_number, TypeDescriptor::int()))
            .field(field!(Model, "company", company, TypeDescriptor::string()))
            .field(field!(Model, "req_id", req_id, TypeDescriptor::string()))
            .method(MethodDescriptor::setter(
                "setAuth_key",
                ParameterDescriptor::new("keys", TypeDescriptor::of::<Keys>().nullable()),
                |model: &mut Model, keys: Option<Keys>| model.keys = keys,
            ))
            .method(
                MethodDescriptor::setter(
                    "setRequestNum",
                    ParameterDescriptor::new("num", TypeDescriptor::string()),
                    |model: &mut Model, num: String| {
                        model.request_number = num.trim().parse().unwrap_or_default();
                    },
                )
                .fills("requestNumber"),
            )
            .method(MethodDescriptor::setter(
                "setReq_id",
                ParameterDescriptor::new("id", TypeDescriptor::string()),
                |model: &mut Model, id: String| model.req_id = format!("req-{id}"),
            ))
            .build()
    }
}

/// A field and the setter owning it.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithFooSetter {
    pub foo: String,
    pub through_setter: String,
    pub calls: u32,
}

impl Describe for ModelWithFooSetter {
    const NAME: &'static str = "ModelWithFooSetter";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(ModelWithFooSetter, "foo", foo, TypeDescriptor::string()))
            .method(MethodDescriptor::setter(
                "setFoo",
                ParameterDescriptor::new("foo", TypeDescriptor::string()),
                |model: &mut ModelWithFooSetter, foo: String| {
                    model.through_setter = foo;
                    model.calls += 1;
                },
            ))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithNullableString {
    pub company: Option<String>,
}

impl Describe for ModelWithNullableString {
    const NAME: &'static str = "ModelWithNullableString";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(
                ModelWithNullableString,
                "company",
                company,
                TypeDescriptor::string().nullable()
            ))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithJsonObject {
    pub tags: JsonObject,
    pub extra: serde_json::Value,
}

impl Describe for ModelWithJsonObject {
    const NAME: &'static str = "ModelWithJsonObject";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(ModelWithJsonObject, "tags", tags, TypeDescriptor::of::<JsonObject>()))
            .field(field!(ModelWithJsonObject, "extra", extra, None::<TypeDescriptor>))
            .build()
    }
}

// -----------------------------------------------------------------------------
// Unions

/// A union field value: the first matching member.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MagicField {
    Device(DeviceInfo),
    Keys(Keys),
}

impl Mappable for MagicField {
    fn type_ident(&self) -> TypeIdent {
        match self {
            MagicField::Device(device) => Mappable::type_ident(device),
            MagicField::Keys(keys) => Mappable::type_ident(keys),
        }
    }

    fn view(&self) -> View<'_> {
        match self {
            MagicField::Device(device) => View::Inner(device),
            MagicField::Keys(keys) => View::Inner(keys),
        }
    }
}

impl FromValue for MagicField {
    fn from_value(value: Value) -> Option<Self> {
        match value.into_object()?.take::<DeviceInfo>() {
            Ok(device) => Some(MagicField::Device(device)),
            Err(object) => object.take::<Keys>().ok().map(MagicField::Keys),
        }
    }
}

fn magic_members() -> [TypeDescriptor; 2] {
    [TypeDescriptor::of::<DeviceInfo>(), TypeDescriptor::of::<Keys>()]
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithUnionType {
    pub magic_field: Option<MagicField>,
}

impl Describe for ModelWithUnionType {
    const NAME: &'static str = "ModelWithUnionType";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(
                ModelWithUnionType,
                "magicField",
                magic_field,
                TypeDescriptor::union(magic_members())
            ))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithNullableUnionType {
    pub magic_field: Option<MagicField>,
}

impl Describe for ModelWithNullableUnionType {
    const NAME: &'static str = "ModelWithNullableUnionType";

    fn describe() -> ClassDescriptor {
        let members = magic_members().into_iter().chain([TypeDescriptor::null()]);

        ClassDescriptor::builder::<Self>()
            .field(field!(
                ModelWithNullableUnionType,
                "magicField",
                magic_field,
                TypeDescriptor::union(members)
            ))
            .build()
    }
}

#[derive(Debug, Default)]
pub(crate) struct ModelWithScalarUnion {
    pub amount: Value,
}

impl Describe for ModelWithScalarUnion {
    const NAME: &'static str = "ModelWithScalarUnion";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(
                ModelWithScalarUnion,
                "amount",
                amount,
                TypeDescriptor::union([TypeDescriptor::int(), TypeDescriptor::string()])
            ))
            .build()
    }
}

// -----------------------------------------------------------------------------
// Output

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithCustomGetter {
    pub company: String,
}

impl Describe for ModelWithCustomGetter {
    const NAME: &'static str = "ModelWithCustomGetter";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(ModelWithCustomGetter, "company", company, TypeDescriptor::string()))
            .method(MethodDescriptor::getter("getCompany", |model: &ModelWithCustomGetter| {
                model.company.to_uppercase()
            }))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithProtectedProperty {
    pub company: String,
    pub password: String,
}

impl Describe for ModelWithProtectedProperty {
    const NAME: &'static str = "ModelWithProtectedProperty";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(ModelWithProtectedProperty, "company", company, TypeDescriptor::string()))
            .field(FieldDescriptor::hidden("password", TypeDescriptor::string()))
            .method(MethodDescriptor::setter(
                "setPassword",
                ParameterDescriptor::new("password", TypeDescriptor::string()),
                |model: &mut ModelWithProtectedProperty, password: String| model.password = password,
            ))
            .build()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithAppendJsonOutput {
    pub first_name: String,
    pub last_name: String,
}

impl Describe for ModelWithAppendJsonOutput {
    const NAME: &'static str = "ModelWithAppendJsonOutput";

    fn describe() -> ClassDescriptor {
        type Model = ModelWithAppendJsonOutput;

        ClassDescriptor::builder::<Self>()
            .field(field!(Model, "firstName", first_name, TypeDescriptor::string()))
            .field(field!(Model, "lastName", last_name, TypeDescriptor::string()))
            .method(
                MethodDescriptor::getter("getFullName", |model: &Model| {
                    format!("{} {}", model.first_name, model.last_name)
                })
                .append_as("full_name"),
            )
            .build()
    }
}

/// Written through its display output.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Masked {
    pub secret: String,
}

impl fmt::Display for Masked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("masked data")
    }
}

impl Describe for Masked {
    const NAME: &'static str = "Masked";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(Masked, "secret", secret, TypeDescriptor::string()))
            .build()
    }

    fn as_display(&self) -> Option<&dyn fmt::Display> {
        Some(self)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithMaskedKeys {
    pub keys: Masked,
}

impl Describe for ModelWithMaskedKeys {
    const NAME: &'static str = "ModelWithMaskedKeys";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(ModelWithMaskedKeys, "keys", keys, TypeDescriptor::of::<Masked>()))
            .build()
    }
}

/// Exposes a mapping, and a display output that must lose to it.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithToMapping {
    pub name: String,
}

impl fmt::Display for ModelWithToMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Describe for ModelWithToMapping {
    const NAME: &'static str = "ModelWithToMapping";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>()
            .field(field!(ModelWithToMapping, "name", name, TypeDescriptor::string()))
            .build()
    }

    fn to_mapping(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        let mut map = serde_json::Map::new();
        map.insert("kind".into(), "mapping".into());
        map.insert("name".into(), self.name.clone().into());
        Some(map)
    }

    fn as_display(&self) -> Option<&dyn fmt::Display> {
        Some(self)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithToJson;

impl Describe for ModelWithToJson {
    const NAME: &'static str = "ModelWithToJson";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>().build()
    }

    fn to_json(&self) -> Option<String> {
        Some(String::from(r#"{"kind":"json"}"#))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct ModelWithSerialize {
    pub payload: serde_json::Value,
}

impl Describe for ModelWithSerialize {
    const NAME: &'static str = "ModelWithSerialize";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>().build()
    }

    fn as_serialize(&self) -> Option<&dyn erased_serde::Serialize> {
        Some(&self.payload)
    }

    fn to_json(&self) -> Option<String> {
        Some(String::from("unused"))
    }
}

/// Iterable object, written like a keyed container.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Counters {
    pub items: IndexMap<String, i64>,
}

impl Describe for Counters {
    const NAME: &'static str = "Counters";

    fn describe() -> ClassDescriptor {
        ClassDescriptor::builder::<Self>().build()
    }

    fn as_entries(&self) -> Option<Entries<'_>> {
        Some(Entries::Keyed(
            self.items
                .iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Mappable))
                .collect(),
        ))
    }
}
