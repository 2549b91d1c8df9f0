use super::observability::ControlEvent;

/// Receives progress records from the reader and writer.
///
/// The core never opens a log file itself; the binary decides where events go.
pub trait ObservabilitySink {
    fn record(&mut self, event: &ControlEvent);
}

impl<T> ObservabilitySink for &mut T
where
    T: ObservabilitySink + ?Sized,
{
    fn record(&mut self, event: &ControlEvent) {
        (**self).record(event);
    }
}
