use tstp::dispatcher::{Dispatcher, Interested, Message, Responsive};
use tstp::frame::message::{Command, Control, Interest, Response};
use tstp::geometry::{Coordinates, Region};
use tstp::smart_data::{Mode, SmartData};
use tstp::transducer::Transducer;
use tstp::units::{quantity, Unit};

struct FakeThermometer {
    reading: i64,
    actuated: Option<i64>,
}

impl Transducer for FakeThermometer {
    const ERROR: u16 = 1;
    const INTERRUPT: bool = false;

    fn unit(&self) -> Unit {
        quantity::temperature()
    }

    fn sense(&mut self) -> i64 {
        self.reading
    }

    fn actuate(&mut self, value: i64) {
        self.actuated = Some(value);
    }
}

fn origin() -> Coordinates<i32> {
    Coordinates::new(0, 0, 0)
}

#[test]
fn response_updates_cache_without_actuating() {
    let device = FakeThermometer {
        reading: 21,
        actuated: None,
    };
    let mut smart_data: SmartData<i32, FakeThermometer, 4> =
        SmartData::local(device, origin(), 100, Mode::Private, 0);

    let response = Response {
        unit: quantity::temperature(),
        value: 99,
        error: 0,
        origin: origin(),
        time: 10,
    };
    let reply = smart_data.update(&Message::Response(response), 10);

    assert!(reply.is_none());
    let (value, stale) = smart_data.value(10);
    assert_eq!(value, 99);
    assert!(!stale);
    assert_eq!(smart_data.history().recent().unwrap().value, 99);
}

#[test]
fn command_actuates_the_local_device_and_responds() {
    let device = FakeThermometer {
        reading: 21,
        actuated: None,
    };
    let mut smart_data: SmartData<i32, FakeThermometer, 4> =
        SmartData::local(device, origin(), 100, Mode::Commanded, 0);

    let command = Command {
        unit: quantity::temperature(),
        region: Region::new(origin(), 10, 0, 100),
        value: 42,
    };
    let reply = smart_data.update(&Message::Command(command), 5);

    let response = reply.expect("a COMMAND always provokes a response");
    assert_eq!(response.value, 42);
    let (value, _) = smart_data.value(5);
    assert_eq!(value, 42);
}

#[test]
fn interest_provokes_a_response_without_mutating_device_value() {
    let device = FakeThermometer {
        reading: 21,
        actuated: None,
    };
    let mut smart_data: SmartData<i32, FakeThermometer, 4> =
        SmartData::local(device, origin(), 100, Mode::Advertised, 0);

    let interest = Interest {
        unit: quantity::temperature(),
        region: Region::new(origin(), 10, 0, 100),
        period_us: None,
    };
    let reply = smart_data.update(&Message::Interest(interest), 3);
    let response = reply.expect("INTEREST always provokes a response from a local source");
    assert_eq!(response.value, 21);
}

#[test]
fn remote_subscriber_returns_the_broadcast_interest() {
    let region = Region::new(origin(), 50, 0, 1000);
    let (smart_data, interest) =
        SmartData::<i32, FakeThermometer, 4>::remote(quantity::temperature(), region, 100, Some(60), 0);
    assert_eq!(interest.unit, quantity::temperature());
    assert_eq!(interest.period_us, Some(60));
    assert_eq!(smart_data.unit(), quantity::temperature());
    assert_eq!(smart_data.mode(), Mode::Private);
}

#[test]
fn dispatcher_notifies_only_responsives_whose_origin_is_in_the_interest_region() {
    let mut dispatcher: Dispatcher<i32, 4> = Dispatcher::new();
    dispatcher
        .attach_responsive(Responsive {
            unit: quantity::temperature(),
            origin: Coordinates::new(0, 0, 0),
            handle: 1,
        })
        .unwrap();
    dispatcher
        .attach_responsive(Responsive {
            unit: quantity::temperature(),
            origin: Coordinates::new(1000, 0, 0),
            handle: 2,
        })
        .unwrap();

    let interest = Interest {
        unit: quantity::temperature(),
        region: Region::new(Coordinates::new(0, 0, 0), 50, 0, 100),
        period_us: None,
    };

    let mut notified = heapless::Vec::<usize, 4>::new();
    dispatcher.update(&Message::Interest(interest), 10, |handle| {
        notified.push(handle).unwrap();
    });

    assert_eq!(notified.as_slice(), &[1]);
}

#[test]
fn dispatcher_control_delete_notifies_by_id() {
    let dispatcher: Dispatcher<i32, 4> = Dispatcher::new();
    let mut notified = None;
    dispatcher.update(&Message::Control(Control::Delete { id: 7 }), 0, |handle| {
        notified = Some(handle);
    });
    assert_eq!(notified, Some(7));
}

#[test]
fn dispatcher_detach_stops_further_notification() {
    let mut dispatcher: Dispatcher<i32, 4> = Dispatcher::new();
    dispatcher
        .attach_interested(Interested {
            unit: quantity::temperature(),
            region: Region::new(Coordinates::new(0, 0, 0), 50, 0, 100),
            handle: 3,
        })
        .unwrap();
    dispatcher.detach_interested(3);

    let response = Response {
        unit: quantity::temperature(),
        value: 1,
        error: 0,
        origin: Coordinates::new(0, 0, 0),
        time: 10,
    };
    let mut notified = false;
    dispatcher.update(&Message::Response(response), 10, |_| notified = true);
    assert!(!notified);
}
