mod fork_join;
mod pool;
mod queue;
mod semaphore;
mod task_queue;
mod work;


pub use self::fork_join::ForkJoin;
pub use self::pool::{WorkerPool, available_workers};
pub use self::queue::BlockingQueue;
pub use self::semaphore::Semaphore;
pub use self::task_queue::TaskQueue;
pub use self::work::{Executor, Interrupted, Job, JobKind, Work};
