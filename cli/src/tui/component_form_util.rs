// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, marker::PhantomData, str::FromStr};

use crate::tui::{component_form::Access, dispatcher::Dispatcher};

/// An access that converts between `Option<T>` and `String`, where `T` is a positive integer type.
pub struct PositiveIntegerAccess<S, T, A>
where
    T: ToString + FromStr + ToOwned + Clone,
    A: Access<S, Option<T>>,
{
    _phantom_s: PhantomData<S>,
    _phantom_a: PhantomData<A>,
    _phantom_t: PhantomData<T>,
}

impl<S, T, A> Access<S, String> for PositiveIntegerAccess<S, T, A>
where
    T: ToString + FromStr + ToOwned + Clone,
    A: Access<S, Option<T>>,
{
    fn get(s: &RefCell<S>) -> String {
        match A::get(s) {
            Some(a) => a.to_string(),
            None => String::new(),
        }
    }

    fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
        let v = value.trim();
        if v.is_empty() {
            A::set(dispatcher, None)
        } else if let Ok(num) = v.parse::<T>() {
            A::set(dispatcher, Some(num))
        } else {
            tracing::debug!(value, "failed to parse as a positive integer");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use calclient_core::EventFormValues;
    use jiff::civil::date;

    use super::*;
    use crate::tui::dispatcher::Action;
    use crate::tui::event_store::EventStore;

    struct MinuteAccess;

    impl Access<EventStore, Option<u32>> for MinuteAccess {
        fn get(store: &RefCell<EventStore>) -> Option<u32> {
            store.borrow().data.minute
        }

        fn set(dispatcher: &mut Dispatcher, value: Option<u32>) -> bool {
            dispatcher.dispatch(Action::UpdateMinute(value));
            true
        }
    }

    type Minute = PositiveIntegerAccess<EventStore, u32, MinuteAccess>;

    fn setup() -> (Rc<RefCell<EventStore>>, Dispatcher) {
        let store = Rc::new(RefCell::new(EventStore::new(&EventFormValues::new(date(
            2025, 6, 1,
        )))));
        let mut dispatcher = Dispatcher::new();
        EventStore::register_to(store.clone(), &mut dispatcher);
        (store, dispatcher)
    }

    #[test]
    fn reads_number_as_text() {
        let (store, _) = setup();
        assert_eq!(Minute::get(&store), "30");
        store.borrow_mut().data.minute = None;
        assert_eq!(Minute::get(&store), "");
    }

    #[test]
    fn writes_parsed_numbers() {
        let (store, mut dispatcher) = setup();
        assert!(Minute::set(&mut dispatcher, " 45 ".to_string()));
        assert_eq!(store.borrow().data.minute, Some(45));

        assert!(Minute::set(&mut dispatcher, String::new()));
        assert_eq!(store.borrow().data.minute, None);
    }

    #[test]
    fn rejects_non_numbers() {
        let (store, mut dispatcher) = setup();
        assert!(!Minute::set(&mut dispatcher, "4a".to_string()));
        assert!(!Minute::set(&mut dispatcher, "-1".to_string()));
        assert_eq!(store.borrow().data.minute, Some(30));
    }
}
