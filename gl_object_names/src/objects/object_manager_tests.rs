/// Tests for ObjectCategoryManager
///
/// These tests drive a manager over a MockDriver and check both the
/// recorded driver traffic and the manager's binding state.

use super::*;
use std::sync::Mutex;
use crate::driver::mock_driver::{DriverCall, MockDriver, FIRST_DRIVER_NAME};
use crate::gl::*;
use crate::names::DriverName;
use crate::objects::NameTable;

// ============================================================================
// Helper Functions
// ============================================================================

fn setup(category: Category, flags: CategoryFlags) -> (ObjectCategoryManager, Arc<Mutex<MockDriver>>, SharedDriver) {
    let mock = Arc::new(Mutex::new(MockDriver::new()));
    let driver: SharedDriver = mock.clone();
    let manager = ObjectCategoryManager::new(
        category,
        flags,
        NameTable::new_shared(category),
        Arc::new(StatsTracker::new()),
    );
    (manager, mock, driver)
}

fn buffers() -> (ObjectCategoryManager, Arc<Mutex<MockDriver>>, SharedDriver) {
    setup(
        Category::Buffers,
        CategoryFlags::SHAREABLE | CategoryFlags::REALIZE_FOR_IS_OBJECT | CategoryFlags::UNBIND_ON_DELETE,
    )
}

// ============================================================================
// Tests: gen
// ============================================================================

#[test]
fn test_gen_has_no_driver_interaction() {
    let (mut manager, mock, _driver) = buffers();
    let names = manager.gen(2).unwrap();
    assert_eq!(names, vec![ApplicationName(1), ApplicationName(2)]);
    assert!(mock.lock().unwrap().calls.is_empty());
}

#[test]
fn test_gen_names_unique_across_deletes() {
    let (mut manager, _mock, driver) = buffers();
    let mut live: Vec<ApplicationName> = Vec::new();
    for round in 0..5 {
        let fresh = manager.gen(3).unwrap();
        for name in &fresh {
            assert!(!live.contains(name), "round {}: {} reissued", round, name);
        }
        live.extend(fresh);
        // Delete every other live name
        let doomed: Vec<ApplicationName> = live.iter().copied().step_by(2).collect();
        manager.delete(&driver, &doomed).unwrap();
        live.retain(|n| !doomed.contains(n));
    }
}

// ============================================================================
// Tests: bind
// ============================================================================

#[test]
fn test_bind_realizes_lazily_and_forwards_driver_name() {
    let (mut manager, mock, driver) = buffers();
    let name = manager.gen(1).unwrap()[0];

    manager.bind(&driver, GL_ARRAY_BUFFER, name).unwrap();

    let mock = mock.lock().unwrap();
    let d1 = DriverName(FIRST_DRIVER_NAME);
    assert_eq!(mock.calls, vec![
        DriverCall::Create(Category::Buffers, d1),
        DriverCall::Bind(Category::Buffers, GL_ARRAY_BUFFER, d1),
    ]);
    assert_eq!(manager.binding(GL_ARRAY_BUFFER), name);
}

#[test]
fn test_rebind_does_not_create_again() {
    let (mut manager, mock, driver) = buffers();
    let name = manager.gen(1).unwrap()[0];
    manager.bind(&driver, GL_ARRAY_BUFFER, name).unwrap();
    manager.bind(&driver, GL_ELEMENT_ARRAY_BUFFER, name).unwrap();
    assert_eq!(mock.lock().unwrap().creates(), 1);
    assert_eq!(manager.bound_target_count(), 2);
}

#[test]
fn test_bind_zero_clears_binding() {
    let (mut manager, mock, driver) = buffers();
    let name = manager.gen(1).unwrap()[0];
    manager.bind(&driver, GL_ARRAY_BUFFER, name).unwrap();

    manager.bind(&driver, GL_ARRAY_BUFFER, ApplicationName::NONE).unwrap();

    assert_eq!(manager.binding(GL_ARRAY_BUFFER), ApplicationName::NONE);
    assert_eq!(
        mock.lock().unwrap().binds().last(),
        Some(&(Category::Buffers, GL_ARRAY_BUFFER, DriverName::NONE))
    );
}

#[test]
fn test_bind_unknown_name_strict_fails() {
    let (mut manager, mock, driver) = setup(Category::VertexArrays, CategoryFlags::STRICT_NAMES);
    let err = manager.bind(&driver, GL_NONE, ApplicationName(5)).unwrap_err();
    assert_eq!(err, Error::UnknownName { category: Category::VertexArrays, name: ApplicationName(5) });
    assert!(mock.lock().unwrap().calls.is_empty());
    assert_eq!(manager.binding(GL_NONE), ApplicationName::NONE);
}

#[test]
fn test_bind_unknown_name_adopted_when_not_strict() {
    let (mut manager, mock, driver) = buffers();
    manager.bind(&driver, GL_ARRAY_BUFFER, ApplicationName(7)).unwrap();

    assert!(manager.is_object(ApplicationName(7)).unwrap());
    assert_eq!(mock.lock().unwrap().creates(), 1);
    // gen never hands out the adopted name
    let fresh = manager.gen(10).unwrap();
    assert!(!fresh.contains(&ApplicationName(7)));
}

#[test]
fn test_bind_driver_failure_keeps_previous_binding() {
    let (mut manager, mock, driver) = buffers();
    let names = manager.gen(2).unwrap();
    manager.bind(&driver, GL_ARRAY_BUFFER, names[0]).unwrap();

    mock.lock().unwrap().fail_bind = true;
    assert!(matches!(manager.bind(&driver, GL_ARRAY_BUFFER, names[1]), Err(Error::DriverFailure(_))));
    assert_eq!(manager.binding(GL_ARRAY_BUFFER), names[0]);
}

#[test]
fn test_failed_create_does_not_adopt_name() {
    let (mut manager, mock, driver) = buffers();
    mock.lock().unwrap().fail_create = true;

    assert!(matches!(
        manager.bind(&driver, GL_ARRAY_BUFFER, ApplicationName(42)),
        Err(Error::DriverFailure(_))
    ));

    let table = manager.table().read().unwrap();
    assert!(!table.is_live(ApplicationName(42)));
    assert_eq!(table.live_count(), 0);
    assert!(!table.has_issued());
    assert_eq!(manager.binding(GL_ARRAY_BUFFER), ApplicationName::NONE);
}

#[test]
fn test_failed_bind_destroys_adopted_object() {
    let (mut manager, mock, driver) = buffers();
    mock.lock().unwrap().fail_bind = true;

    assert!(manager.bind(&driver, GL_ARRAY_BUFFER, ApplicationName(42)).is_err());

    assert!(!manager.table().read().unwrap().is_live(ApplicationName(42)));
    let mock = mock.lock().unwrap();
    assert_eq!(mock.creates(), 1);
    assert_eq!(mock.destroyed(), vec![DriverName(FIRST_DRIVER_NAME)]);
    assert_eq!(mock.live_count(), 0);
}

#[test]
fn test_failed_bind_keeps_generated_name() {
    let (mut manager, mock, driver) = buffers();
    let name = manager.gen(1).unwrap()[0];
    mock.lock().unwrap().fail_create = true;

    assert!(manager.bind(&driver, GL_ARRAY_BUFFER, name).is_err());
    assert!(manager.table().read().unwrap().is_live(name));
}

// ============================================================================
// Tests: delete
// ============================================================================

#[test]
fn test_delete_bound_name_unbinds_before_destroy() {
    let (mut manager, mock, driver) = buffers();
    let name = manager.gen(1).unwrap()[0];
    manager.bind(&driver, GL_ARRAY_BUFFER, name).unwrap();

    manager.delete(&driver, &[name]).unwrap();

    let mock = mock.lock().unwrap();
    let d1 = DriverName(FIRST_DRIVER_NAME);
    assert_eq!(&mock.calls[2..], &[
        DriverCall::Bind(Category::Buffers, GL_ARRAY_BUFFER, DriverName::NONE),
        DriverCall::Destroy(Category::Buffers, vec![d1]),
    ]);
    assert_eq!(manager.binding(GL_ARRAY_BUFFER), ApplicationName::NONE);
    assert!(!manager.is_object(name).unwrap());
}

#[test]
fn test_delete_unbinds_every_target_of_the_name() {
    let (mut manager, _mock, driver) = setup(
        Category::Textures,
        CategoryFlags::REALIZE_FOR_IS_OBJECT | CategoryFlags::UNBIND_ON_DELETE,
    );
    let names = manager.gen(2).unwrap();
    manager.bind(&driver, GL_TEXTURE_2D, names[0]).unwrap();
    manager.bind(&driver, GL_TEXTURE_3D, names[0]).unwrap();
    manager.bind(&driver, GL_TEXTURE_CUBE_MAP, names[1]).unwrap();

    manager.delete(&driver, &[names[0]]).unwrap();

    assert_eq!(manager.binding(GL_TEXTURE_2D), ApplicationName::NONE);
    assert_eq!(manager.binding(GL_TEXTURE_3D), ApplicationName::NONE);
    assert_eq!(manager.binding(GL_TEXTURE_CUBE_MAP), names[1]);
}

#[test]
fn test_delete_without_unbind_flag_skips_driver_unbind() {
    let (mut manager, mock, driver) = setup(Category::Buffers, CategoryFlags::REALIZE_FOR_IS_OBJECT);
    let name = manager.gen(1).unwrap()[0];
    manager.bind(&driver, GL_ARRAY_BUFFER, name).unwrap();

    manager.delete(&driver, &[name]).unwrap();

    assert_eq!(mock.lock().unwrap().binds().len(), 1);
    assert_eq!(manager.binding(GL_ARRAY_BUFFER), ApplicationName::NONE);
}

#[test]
fn test_delete_twice_and_unknown_is_ok() {
    let (mut manager, mock, driver) = buffers();
    let name = manager.gen(1).unwrap()[0];
    manager.bind(&driver, GL_ARRAY_BUFFER, name).unwrap();

    manager.delete(&driver, &[name]).unwrap();
    manager.delete(&driver, &[name]).unwrap();
    manager.delete(&driver, &[ApplicationName(1234), ApplicationName::NONE]).unwrap();

    assert_eq!(mock.lock().unwrap().destroyed().len(), 1);
}

#[test]
fn test_delete_unbound_unrealized_name_has_no_driver_call() {
    let (mut manager, mock, driver) = buffers();
    let name = manager.gen(1).unwrap()[0];
    manager.delete(&driver, &[name]).unwrap();
    assert!(mock.lock().unwrap().calls.is_empty());
    assert!(!read_table(manager.table()).unwrap().is_live(name));
}

// ============================================================================
// Tests: is_object
// ============================================================================

#[test]
fn test_is_object_requires_realization_when_flagged() {
    let (mut manager, _mock, driver) = buffers();
    let name = manager.gen(1).unwrap()[0];
    assert!(!manager.is_object(name).unwrap());
    manager.bind(&driver, GL_ARRAY_BUFFER, name).unwrap();
    assert!(manager.is_object(name).unwrap());
}

#[test]
fn test_is_object_true_after_gen_without_realization_flag() {
    let (mut manager, _mock, _driver) = setup(Category::Buffers, CategoryFlags::empty());
    let name = manager.gen(1).unwrap()[0];
    assert!(manager.is_object(name).unwrap());
}

#[test]
fn test_is_object_zero_and_unknown_false() {
    let (manager, _mock, _driver) = buffers();
    assert!(!manager.is_object(ApplicationName::NONE).unwrap());
    assert!(!manager.is_object(ApplicationName(3)).unwrap());
}
