/*
 * Unit tests for the car state and SCAN ordering
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_car_init
 *  - test_start_floor_outside_range_rejected
 *  - test_scan_order_going_up
 *  - test_scan_order_going_down
 *  - test_scan_order_idle_prefers_above
 *  - test_new_stop_between_recomputes_order
 *  - test_add_stop_is_idempotent
 *  - test_current_floor_served_without_movement
 *  - test_next_stop_sets_direction
 *  - test_step_toward_moves_one_floor
 *  - test_availability
 *  - test_maintenance_keeps_queue
 *  - test_exit_maintenance_mid_trip_keeps_moving
 *  - test_interrupt_requeues_target
 *  - test_occupancy_limits
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod car_tests {
    use crate::elevator::Car;
    use crate::shared::CarState::{Idle, Maintenance, Moving, Stopped};
    use crate::shared::Direction::{Down, Up};
    use crate::shared::{DispatchError, Floor};

    fn setup_car(floors: &[Floor]) -> Car {
        let mut car = Car::new(1, 0, 9, 0, 8).unwrap();
        for floor in floors {
            car.add_stop(*floor);
        }
        car
    }

    fn drain(car: &mut Car) -> Vec<Floor> {
        let mut served = Vec::new();
        while let Some(target) = car.next_stop() {
            while !car.step_toward(target) {}
            car.arrive();
            served.push(target);
        }
        served
    }

    #[test]
    fn test_car_init() {
        let car = Car::new(2, -1, 5, 3, 6).unwrap();
        let status = car.status();

        assert_eq!(status.id, 2);
        assert_eq!(status.floor, 3);
        assert_eq!(status.state, Idle);
        assert_eq!(status.direction, crate::shared::Direction::Idle);
        assert!(status.pending_stops.is_empty());
        assert!(car.serves(-1));
        assert!(!car.serves(6));
    }

    #[test]
    fn test_start_floor_outside_range_rejected() {
        let above = Car::new(1, 0, 9, 12, 8);
        let below = Car::new(2, 0, 9, -1, 8);

        assert_eq!(above, Err(DispatchError::InvalidFloor { floor: 12, min: 0, max: 9 }));
        assert_eq!(below, Err(DispatchError::InvalidFloor { floor: -1, min: 0, max: 9 }));
    }

    #[test]
    fn test_scan_order_going_up() {
        // Purpose: floors at or above come first ascending, then the rest descending

        // Arrange
        let mut car = setup_car(&[1, 8, 4, 6, 2, 5]);
        car.test_place(4, Up, Moving);

        // Act
        let order = car.scan_order();

        // Assert
        assert_eq!(order, vec![4, 5, 6, 8, 2, 1]);
    }

    #[test]
    fn test_scan_order_going_down() {
        let mut car = setup_car(&[1, 8, 6, 2, 5]);
        car.test_place(4, Down, Moving);

        assert_eq!(car.scan_order(), vec![2, 1, 5, 6, 8]);
    }

    #[test]
    fn test_scan_order_idle_prefers_above() {
        let mut car = setup_car(&[0, 7, 3]);
        car.test_place(5, crate::shared::Direction::Idle, Idle);

        assert_eq!(car.scan_order(), vec![7, 3, 0]);
    }

    #[test]
    fn test_new_stop_between_recomputes_order() {
        // Purpose: a car at 3 heading up to 7 picks up a new stop at 6 first

        // Arrange
        let mut car = setup_car(&[7]);
        car.test_place(3, Up, Moving);

        // Act
        car.add_stop(6);

        // Assert
        assert_eq!(car.scan_order(), vec![6, 7]);
        assert_eq!(car.next_stop(), Some(6));
    }

    #[test]
    fn test_add_stop_is_idempotent() {
        // Arrange
        let mut car = setup_car(&[]);

        // Act
        let first = car.add_stop(5);
        let second = car.add_stop(5);
        let served = drain(&mut car);

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(served, vec![5]);
    }

    #[test]
    fn test_current_floor_served_without_movement() {
        let mut car = setup_car(&[0]);

        let target = car.next_stop();

        assert_eq!(target, Some(0));
        assert!(car.step_toward(0));
        assert_eq!(car.floor(), 0);
        // Direction is left alone for a stop at the current floor
        assert_eq!(car.direction(), crate::shared::Direction::Idle);
    }

    #[test]
    fn test_next_stop_sets_direction() {
        let mut car = setup_car(&[6, 2]);
        car.test_place(4, Down, Stopped);

        assert_eq!(car.next_stop(), Some(2));
        assert_eq!(car.direction(), Down);
        assert_eq!(car.state(), Moving);

        while !car.step_toward(2) {}
        assert_eq!(car.next_stop(), Some(6));
        assert_eq!(car.direction(), Up);
    }

    #[test]
    fn test_step_toward_moves_one_floor() {
        let mut car = setup_car(&[]);

        assert!(!car.step_toward(3));
        assert_eq!(car.floor(), 1);
        assert!(!car.step_toward(3));
        assert!(car.step_toward(3));
        assert_eq!(car.floor(), 3);
    }

    #[test]
    fn test_availability() {
        let mut car = setup_car(&[]);
        assert!(car.is_available());

        car.set_occupancy(8).unwrap();
        assert!(!car.is_available());

        car.set_occupancy(3).unwrap();
        car.enter_maintenance();
        assert!(!car.is_available());
    }

    #[test]
    fn test_maintenance_keeps_queue() {
        // Arrange
        let mut car = setup_car(&[3, 5]);

        // Act
        car.enter_maintenance();
        car.add_stop(7);
        let status = car.status();
        let resume = car.exit_maintenance();

        // Assert
        assert_eq!(status.state, Maintenance);
        assert_eq!(status.pending_stops, vec![3, 5, 7]);
        assert!(resume);
        assert_eq!(car.state(), Idle);
    }

    #[test]
    fn test_exit_maintenance_mid_trip_keeps_moving() {
        // Purpose: a car toggled in and out of maintenance before its worker halts is still travelling

        // Arrange
        let mut car = setup_car(&[6]);
        let target = car.next_stop().unwrap();
        car.step_toward(target);

        // Act
        car.enter_maintenance();
        let resume = car.exit_maintenance();
        let status = car.status();

        // Assert
        assert!(!resume);
        assert_eq!(status.state, Moving);
        assert_eq!(status.direction, Up);
        assert_eq!(status.target, Some(6));
    }

    #[test]
    fn test_interrupt_requeues_target() {
        let mut car = setup_car(&[5]);
        let target = car.next_stop().unwrap();
        car.step_toward(target);

        car.enter_maintenance();
        car.interrupt(target);

        assert_eq!(car.floor(), 1);
        assert_eq!(car.status().pending_stops, vec![5]);
        assert_eq!(car.status().target, None);

        car.exit_maintenance();
        assert_eq!(car.state(), Idle);
        assert_eq!(car.direction(), Up);
    }

    #[test]
    fn test_occupancy_limits() {
        let mut car = setup_car(&[]);

        let result = car.set_occupancy(9);

        assert_eq!(
            result,
            Err(DispatchError::OverCapacity { car: 1, load: 9, capacity: 8 })
        );
        assert_eq!(car.status().occupancy, 0);
    }
}
