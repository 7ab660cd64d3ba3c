/// Unit tests for MockDriver
///
/// The other test suites rely on its call log and name numbering.

use super::*;
use crate::gl::*;

#[test]
fn test_mock_driver_names_start_at_first_driver_name() {
    let mut driver = MockDriver::new();
    assert_eq!(driver.create(Category::Buffers).unwrap(), DriverName(FIRST_DRIVER_NAME));
    assert_eq!(driver.create(Category::Textures).unwrap(), DriverName(FIRST_DRIVER_NAME + 1));
    assert_eq!(driver.creates(), 2);
    assert_eq!(driver.live_count(), 2);
}

#[test]
fn test_mock_driver_destroy_removes_live_objects() {
    let mut driver = MockDriver::new();
    let a = driver.create(Category::Buffers).unwrap();
    let b = driver.create(Category::Buffers).unwrap();
    driver.destroy(Category::Buffers, &[a]).unwrap();
    assert!(!driver.is_live(Category::Buffers, a));
    assert!(driver.is_live(Category::Buffers, b));
    assert_eq!(driver.destroyed(), vec![a]);
}

#[test]
fn test_mock_driver_records_binds_in_order() {
    let mut driver = MockDriver::new();
    driver.bind(Category::Buffers, GL_ARRAY_BUFFER, DriverName(5)).unwrap();
    driver.bind(Category::Buffers, GL_ARRAY_BUFFER, DriverName::NONE).unwrap();
    assert_eq!(driver.binds(), vec![
        (Category::Buffers, GL_ARRAY_BUFFER, DriverName(5)),
        (Category::Buffers, GL_ARRAY_BUFFER, DriverName::NONE),
    ]);
}

#[test]
fn test_mock_driver_failures() {
    let mut driver = MockDriver::new();
    driver.fail_create = true;
    driver.fail_bind = true;
    driver.fail_destroy = true;
    assert!(matches!(driver.create(Category::Buffers), Err(Error::DriverFailure(_))));
    assert!(driver.bind(Category::Buffers, GL_ARRAY_BUFFER, DriverName(1)).is_err());
    assert!(driver.destroy(Category::Buffers, &[DriverName(1)]).is_err());
    assert!(driver.calls.is_empty());
}

#[test]
fn test_mock_driver_attachment_parameters() {
    let mut driver = MockDriver::new();
    driver.set_attachment_parameter(GL_FRAMEBUFFER, GL_COLOR_ATTACHMENT0, GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE, GL_TEXTURE as i32);
    assert_eq!(
        driver.framebuffer_attachment_parameter(GL_FRAMEBUFFER, GL_COLOR_ATTACHMENT0, GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE).unwrap(),
        GL_TEXTURE as i32
    );
    // Unset parameters read as 0
    assert_eq!(
        driver.framebuffer_attachment_parameter(GL_FRAMEBUFFER, GL_DEPTH_ATTACHMENT, GL_FRAMEBUFFER_ATTACHMENT_OBJECT_NAME).unwrap(),
        0
    );
}
