//! Newtype ID types, following the `impl_id!` pattern from the teacher crate's
//! `internal/ids.rs`, trimmed to the single ID family this engine needs: state
//! identifiers for NFA/DFA/lazy-DFA states. The reduced alphabet (literal char
//! or `ANYCHAR`, see [`crate::internal::ast::Label`]) needs no character-class
//! registry, so no `CharClassID` family is carried over.

macro_rules! impl_id {
    ($name:ident, $tp:ty) => {
        /// A dense, non-negative automaton state identifier.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub(crate) struct $name($tp);

        impl $name {
            #[inline]
            pub(crate) const fn new(index: $tp) -> Self {
                $name(index)
            }

            #[inline]
            pub(crate) fn as_usize(&self) -> usize {
                self.0 as usize
            }

            #[inline]
            #[allow(dead_code)]
            pub(crate) fn id(&self) -> $tp {
                self.0
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl<T> std::ops::IndexMut<$name> for [T] {
            #[inline]
            fn index_mut(&mut self, index: $name) -> &mut T {
                &mut self[index.0 as usize]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;

            #[inline]
            fn index(&self, index: $name) -> &Self::Output {
                &self[index.0 as usize]
            }
        }

        impl<T> std::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, index: $name) -> &mut T {
                &mut self[index.0 as usize]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$tp> for $name {
            fn from(index: $tp) -> Self {
                $name::new(index)
            }
        }
    };
}

pub(crate) type StateIDBase = u32;
impl_id!(StateID, StateIDBase);
