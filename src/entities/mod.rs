//! Entity module - Contains all SeaORM entity definitions for the rescue store.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod adoption;
pub mod animal;
pub mod expense;
pub mod file_attachment;
pub mod income;
pub mod intake;
pub mod license;
pub mod money;
pub mod money_owed;
pub mod person;
pub mod puppy_group;
pub mod trip;
pub mod trip_animal;
pub mod vet_service;
pub mod vet_visit;

// Re-export specific types to avoid conflicts
pub use adoption::{Column as AdoptionColumn, Entity as Adoption, Model as AdoptionModel};
pub use animal::{
    AnimalStatus, Column as AnimalColumn, Entity as Animal, Model as AnimalModel, Sex,
};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use file_attachment::{
    Column as FileAttachmentColumn, Entity as FileAttachment, Model as FileAttachmentModel,
};
pub use income::{Column as IncomeColumn, Entity as Income, Model as IncomeModel};
pub use intake::{Column as IntakeColumn, Entity as Intake, Model as IntakeModel};
pub use license::{Column as LicenseColumn, Entity as License, Model as LicenseModel};
pub use money::Money;
pub use money_owed::{Column as MoneyOwedColumn, Entity as MoneyOwed, Model as MoneyOwedModel};
pub use person::{Column as PersonColumn, Entity as Person, Model as PersonModel, PersonType};
pub use puppy_group::{
    Column as PuppyGroupColumn, Entity as PuppyGroup, Model as PuppyGroupModel,
};
pub use trip::{Column as TripColumn, Entity as Trip, Model as TripModel};
pub use trip_animal::{Column as TripAnimalColumn, Entity as TripAnimal, Model as TripAnimalModel};
pub use vet_service::{Column as VetServiceColumn, Entity as VetService, Model as VetServiceModel};
pub use vet_visit::{Column as VetVisitColumn, Entity as VetVisit, Model as VetVisitModel};
