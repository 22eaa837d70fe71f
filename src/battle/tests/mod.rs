pub mod common;

#[cfg(test)]
mod test_damage_effects;
#[cfg(test)]
mod test_fainting;
