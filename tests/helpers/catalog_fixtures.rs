//! A small shop domain used across the integration tests.
//!
//! ```text
//! Shop            Order (rule host), Customer (+ nested Address, Secret), Box, Box<T>
//! Shop.Actions    Audit (rule action)
//! Shop.Tools      Calc (static helpers), OrderExtensions (Describe)
//! Vendor          Supplier (assembly "vendor")
//! ```

use std::sync::Arc;

use rulex::metadata::{
    Capabilities, CatalogBuilder, FieldDef, MethodDef, ParamDef, ParamDirection, PrimitiveType,
    PropertyDef, ResolutionContext, TypeDef, TypeId, TypeRef, Visibility,
};
use rulex::RuleParser;

pub struct ShopTypes {
    pub order: TypeId,
    pub customer: TypeId,
    pub address: TypeId,
    pub secret: TypeId,
    pub plain_box: TypeId,
    pub generic_box: TypeId,
    pub audit: TypeId,
    pub calc: TypeId,
    pub supplier: TypeId,
}

fn int() -> TypeRef {
    TypeRef::INT
}

pub fn shop_catalog() -> (CatalogBuilder, ShopTypes) {
    let mut b = CatalogBuilder::new("shop");

    let customer = b.add_type(
        TypeDef::class("Customer")
            .in_namespace("Shop")
            .with_property(PropertyDef::read_only("Name", PrimitiveType::String))
            .with_field(FieldDef::new("Vip", PrimitiveType::Bool))
            .with_constructor(MethodDef::constructor())
            .with_constructor(
                MethodDef::constructor().param(ParamDef::new("name", PrimitiveType::String)),
            ),
    );
    let address = b.add_nested_type(
        customer,
        TypeDef::class("Address")
            .with_field(FieldDef::new("City", PrimitiveType::String))
            .with_constructor(MethodDef::constructor()),
    );
    let secret = b.add_nested_type(
        customer,
        TypeDef::class("Secret").with_visibility(Visibility::Private),
    );

    let order = b.add_type(
        TypeDef::class("Order")
            .in_namespace("Shop")
            .with_field(FieldDef::new("total", int()))
            .with_field(FieldDef::new("flagged", PrimitiveType::Bool))
            .with_field(FieldDef::new("codes", TypeRef::array_of(int(), 1)))
            .with_field(FieldDef::new("secret", int()).with_visibility(Visibility::Private))
            .with_field(FieldDef::new("Limit", int()).as_static())
            .with_field(FieldDef::new("weight", PrimitiveType::Double))
            .with_property(PropertyDef::read_write("Note", PrimitiveType::String))
            .with_property(PropertyDef::read_only("Customer", customer))
            .with_property(
                PropertyDef::read_write("Item", PrimitiveType::String)
                    .indexed_by(ParamDef::new("index", int())),
            )
            .with_method(MethodDef::new("Raise", int()).param(ParamDef::new("by", int())))
            .with_method(
                MethodDef::new("Pick", PrimitiveType::Bool)
                    .param(ParamDef::new("a", int()))
                    .param(ParamDef::new("b", int())),
            )
            .with_method(MethodDef::new("Pick", int()).param(ParamDef::params("all", int())))
            .with_method(
                MethodDef::new("Mix", int())
                    .param(ParamDef::new("a", int()))
                    .param(ParamDef::params("rest", int())),
            )
            .with_method(
                MethodDef::new("Mix", int())
                    .param(ParamDef::new("a", int()))
                    .param(ParamDef::params("rest", PrimitiveType::Int64)),
            )
            .with_method(
                MethodDef::new("Adjust", PrimitiveType::Bool)
                    .param(ParamDef::new("value", int()).with_direction(ParamDirection::Ref)),
            )
            .with_method(
                MethodDef::new("Max", int())
                    .as_static()
                    .param(ParamDef::new("a", int()))
                    .param(ParamDef::new("b", int())),
            ),
    );

    let plain_box = b.add_type(
        TypeDef::class("Box")
            .in_namespace("Shop")
            .with_field(FieldDef::new("Size", int()))
            .with_constructor(MethodDef::constructor()),
    );
    let generic_box = b.add_type(
        TypeDef::class("Box")
            .in_namespace("Shop")
            .generic(1)
            .with_field(FieldDef::new("Value", TypeRef::Param(0)))
            .with_constructor(MethodDef::constructor()),
    );

    let audit = b.add_type(
        TypeDef::class("Audit")
            .in_namespace("Shop.Actions")
            .with_capabilities(Capabilities::RULE_ACTION)
            .with_constructor(
                MethodDef::constructor().param(ParamDef::new("message", PrimitiveType::String)),
            )
            .with_constructor(
                MethodDef::constructor()
                    .param(ParamDef::new("message", PrimitiveType::String))
                    .param(ParamDef::params("codes", int())),
            ),
    );

    let calc = b.add_type(
        TypeDef::class("Calc").in_namespace("Shop.Tools").with_method(
            MethodDef::new("Clamp", int())
                .as_static()
                .param(ParamDef::new("value", int()))
                .param(ParamDef::new("low", int()))
                .param(ParamDef::new("high", int())),
        ),
    );
    let extensions = b.add_type(TypeDef::class("OrderExtensions").in_namespace("Shop.Tools"));
    b.add_extension_method(
        extensions,
        order,
        MethodDef::new("Describe", PrimitiveType::String),
    );

    let supplier = b.add_type(
        TypeDef::class("Supplier")
            .in_namespace("Vendor")
            .in_assembly("vendor")
            .with_field(FieldDef::new("Rating", int()))
            .with_field(FieldDef::new("margin", int()).with_visibility(Visibility::Assembly)),
    );

    let types = ShopTypes {
        order,
        customer,
        address,
        secret,
        plain_box,
        generic_box,
        audit,
        calc,
        supplier,
    };
    (b, types)
}

/// Resolution context with `Order` as "this".
pub fn order_context() -> (ResolutionContext, ShopTypes) {
    let (b, types) = shop_catalog();
    let context = ResolutionContext::new(Arc::new(b.build()), types.order);
    (context, types)
}

pub fn order_parser() -> RuleParser {
    let (context, _) = order_context();
    RuleParser::new(context)
}
