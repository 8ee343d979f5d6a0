use domain::{Notice, NoticeLevel, Notifier};

/// Success notices go to stdout, errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice),
            NoticeLevel::Error => eprintln!("{}", notice),
        }
    }
}
