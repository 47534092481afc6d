mod enigo_paste;

pub use enigo_paste::EnigoPasteSimulator;
