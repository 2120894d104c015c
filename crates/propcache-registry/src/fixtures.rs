//! Described types shared by the registry tests.

use std::any::Any;

use propcache_core::cast;
use propcache_core::{PropertyInfo, Reflect, TypeCategory, TypeInfo, ValueType, Visibility};

// === Classes ===

pub struct Animal {
    pub name: String,
    pub age: u32,
}

impl Animal {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            age: 3,
        }
    }
}

impl Reflect for Animal {
    fn type_name() -> &'static str {
        "fixtures::Animal"
    }

    fn type_info() -> TypeInfo {
        TypeInfo::class::<Animal>()
            .property(
                PropertyInfo::build::<Animal, String>("Name")
                    .get(Visibility::Public, |a| a.name.clone())
                    .set(Visibility::Public, |a, v| a.name = v)
                    .build(),
            )
            .property(
                PropertyInfo::build::<Animal, u32>("Age")
                    .get(Visibility::Public, |a| a.age)
                    .set(Visibility::Private, |a, v| a.age = v)
                    .build(),
            )
            .build()
    }

    fn cast_ref(instance: &dyn Any) -> Option<&Self> {
        cast::class_ref::<Self>(instance)
    }

    fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
        cast::class_mut::<Self>(instance)
    }
}

pub struct Dog {
    pub animal: Animal,
    pub breed: String,
}

impl Dog {
    pub fn new(name: &str, breed: &str) -> Self {
        Self {
            animal: Animal::new(name),
            breed: breed.into(),
        }
    }
}

impl Reflect for Dog {
    fn type_name() -> &'static str {
        "fixtures::Dog"
    }

    fn type_info() -> TypeInfo {
        TypeInfo::class::<Dog>()
            .base::<Animal>(|d| &d.animal, |d| &mut d.animal)
            .property(
                PropertyInfo::build::<Dog, String>("Breed")
                    .get(Visibility::Protected, |d| d.breed.clone())
                    .set(Visibility::Private, |d, v| d.breed = v)
                    .build(),
            )
            .build()
    }

    fn cast_ref(instance: &dyn Any) -> Option<&Self> {
        cast::class_ref::<Self>(instance)
    }

    fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
        cast::class_mut::<Self>(instance)
    }
}

/// Redeclares `Name` and carries an indexed property.
pub struct Puppy {
    pub dog: Dog,
    pub litter: Vec<String>,
}

impl Puppy {
    pub fn new(name: &str) -> Self {
        Self {
            dog: Dog::new(name, "beagle"),
            litter: vec!["a".into(), "b".into()],
        }
    }
}

impl Reflect for Puppy {
    fn type_name() -> &'static str {
        "fixtures::Puppy"
    }

    fn type_info() -> TypeInfo {
        TypeInfo::class::<Puppy>()
            .base::<Dog>(|p| &p.dog, |p| &mut p.dog)
            .property(
                PropertyInfo::build::<Puppy, String>("Name")
                    .get(Visibility::Public, |p| format!("little {}", p.dog.animal.name))
                    .build(),
            )
            .property(
                PropertyInfo::build::<Puppy, String>("Item")
                    .get(Visibility::Public, |p| p.litter.join(","))
                    .indexed(["index"])
                    .build(),
            )
            .build()
    }

    fn cast_ref(instance: &dyn Any) -> Option<&Self> {
        cast::class_ref::<Self>(instance)
    }

    fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
        cast::class_mut::<Self>(instance)
    }
}

/// Open generic definition, described without code.
pub fn open_list() -> TypeInfo {
    TypeInfo::metadata("fixtures::List", TypeCategory::Class)
        .with_generic_params(["T"])
        .with_property(
            PropertyInfo::declared("fixtures::List", "Count", ValueType::of::<i32>()).with_getter(Visibility::Public),
        )
}

// === Interfaces ===

pub trait IA {
    fn x_a(&self) -> i32;
}

pub trait IB {
    fn x_b(&self) -> i32;
}

pub trait IC: IA + IB {}

pub trait ID: IA + IB {}

pub trait IE: IA {
    fn x_e(&self) -> i32;
}

macro_rules! interface_reflect {
    ($trait_:ident, $name:literal, |$info:ident| $describe:expr) => {
        impl Reflect for dyn $trait_ {
            fn type_name() -> &'static str {
                $name
            }

            fn type_info() -> TypeInfo {
                let $info = TypeInfo::interface::<dyn $trait_>();
                $describe.build()
            }

            fn cast_ref(instance: &dyn Any) -> Option<&Self> {
                cast::interface_ref::<dyn $trait_>(instance)
            }

            fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
                cast::interface_mut::<dyn $trait_>(instance)
            }
        }
    };
}

interface_reflect!(IA, "fixtures::IA", |info| info.property(
    PropertyInfo::build::<dyn IA, i32>("X")
        .get(Visibility::Public, |a| a.x_a())
        .build()
));

interface_reflect!(IB, "fixtures::IB", |info| info.property(
    PropertyInfo::build::<dyn IB, i32>("X")
        .get(Visibility::Public, |b| b.x_b())
        .build()
));

interface_reflect!(IC, "fixtures::IC", |info| info.extends::<dyn IA>().extends::<dyn IB>());

interface_reflect!(ID, "fixtures::ID", |info| info.extends::<dyn IB>().extends::<dyn IA>());

interface_reflect!(IE, "fixtures::IE", |info| info.extends::<dyn IA>().property(
    PropertyInfo::build::<dyn IE, i32>("X")
        .get(Visibility::Public, |e| e.x_e())
        .build()
));

/// Implements every fixture interface.
pub struct Widget {
    pub a: i32,
    pub b: i32,
    pub e: i32,
}

impl IA for Widget {
    fn x_a(&self) -> i32 {
        self.a
    }
}

impl IB for Widget {
    fn x_b(&self) -> i32 {
        self.b
    }
}

impl IC for Widget {}

impl ID for Widget {}

impl IE for Widget {
    fn x_e(&self) -> i32 {
        self.e
    }
}

macro_rules! casts {
    ($($trait_:ident => $as_ref:ident, $as_mut:ident;)*) => {
        $(
            fn $as_ref(w: &Widget) -> &(dyn $trait_ + 'static) {
                w
            }

            fn $as_mut(w: &mut Widget) -> &mut (dyn $trait_ + 'static) {
                w
            }
        )*
    };
}

casts! {
    IA => as_ia, as_ia_mut;
    IB => as_ib, as_ib_mut;
    IC => as_ic, as_ic_mut;
    ID => as_id, as_id_mut;
    IE => as_ie, as_ie_mut;
}

impl Reflect for Widget {
    fn type_name() -> &'static str {
        "fixtures::Widget"
    }

    fn type_info() -> TypeInfo {
        TypeInfo::class::<Widget>()
            .implements::<dyn IA>(as_ia, as_ia_mut)
            .implements::<dyn IB>(as_ib, as_ib_mut)
            .implements::<dyn IC>(as_ic, as_ic_mut)
            .implements::<dyn ID>(as_id, as_id_mut)
            .implements::<dyn IE>(as_ie, as_ie_mut)
            .build()
    }

    fn cast_ref(instance: &dyn Any) -> Option<&Self> {
        cast::class_ref::<Self>(instance)
    }

    fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
        cast::class_mut::<Self>(instance)
    }
}
