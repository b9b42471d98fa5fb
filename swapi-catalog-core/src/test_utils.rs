//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use swapi_catalog_client::{
    ApiResponse, CatalogItem, ClientError, Person, Planet, ResourceClient, Result as ClientResult,
};
use tokio::sync::RwLock;

// ===== MockResourceClient =====

/// One queued collection answer: wait `delay`, then return `result`.
type Scripted<T> = (Duration, ClientResult<Vec<T>>);

pub struct MockResourceClient {
    people: RwLock<ClientResult<Vec<Person>>>,
    planets: RwLock<ClientResult<Vec<Planet>>>,
    /// 排队的响应，优先于 `people`（用于测试并发请求的先后顺序）
    people_queue: RwLock<VecDeque<Scripted<Person>>>,
    /// 每次请求前的延迟
    delay: RwLock<Duration>,
    people_calls: AtomicUsize,
    planets_calls: AtomicUsize,
    by_id_calls: AtomicUsize,
}

impl MockResourceClient {
    pub fn new() -> Self {
        Self {
            people: RwLock::new(Ok(Vec::new())),
            planets: RwLock::new(Ok(Vec::new())),
            people_queue: RwLock::new(VecDeque::new()),
            delay: RwLock::new(Duration::ZERO),
            people_calls: AtomicUsize::new(0),
            planets_calls: AtomicUsize::new(0),
            by_id_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_people(people: Vec<Person>) -> Self {
        let mut mock = Self::new();
        mock.people = RwLock::new(Ok(people));
        mock
    }

    pub fn with_planets(planets: Vec<Planet>) -> Self {
        let mut mock = Self::new();
        mock.planets = RwLock::new(Ok(planets));
        mock
    }

    pub async fn set_people(&self, people: Vec<Person>) {
        *self.people.write().await = Ok(people);
    }

    pub async fn set_people_error(&self, err: ClientError) {
        *self.people.write().await = Err(err);
    }

    pub async fn set_planets_error(&self, err: ClientError) {
        *self.planets.write().await = Err(err);
    }

    pub async fn push_people_response(&self, delay: Duration, result: ClientResult<Vec<Person>>) {
        self.people_queue.write().await.push_back((delay, result));
    }

    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    pub fn people_calls(&self) -> usize {
        self.people_calls.load(Ordering::SeqCst)
    }

    pub fn planets_calls(&self) -> usize {
        self.planets_calls.load(Ordering::SeqCst)
    }

    pub fn by_id_calls(&self) -> usize {
        self.by_id_calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

fn find_by_id<T: CatalogItem + Clone>(
    items: &ClientResult<Vec<T>>,
    id: &str,
) -> ClientResult<T> {
    let items = items.as_ref().map_err(Clone::clone)?;
    items
        .iter()
        .find(|item| item.id().as_deref() == Some(id))
        .cloned()
        .ok_or_else(|| ClientError::HttpStatus {
            status: 404,
            url: format!("https://test.com/api{}/{id}/", T::KIND.path()),
        })
}

#[async_trait]
impl ResourceClient for MockResourceClient {
    async fn get_people(&self) -> ClientResult<ApiResponse<Person>> {
        self.people_calls.fetch_add(1, Ordering::SeqCst);

        let queued = self.people_queue.write().await.pop_front();
        let result = match queued {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => {
                self.pause().await;
                self.people.read().await.clone()
            }
        };
        result.map(ApiResponse::complete)
    }

    async fn get_planets(&self) -> ClientResult<ApiResponse<Planet>> {
        self.planets_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.planets.read().await.clone().map(ApiResponse::complete)
    }

    async fn get_person_by_id(&self, id: &str) -> ClientResult<Person> {
        self.by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        find_by_id(&*self.people.read().await, id)
    }

    async fn get_planet_by_id(&self, id: &str) -> ClientResult<Planet> {
        self.by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        find_by_id(&*self.planets.read().await, id)
    }
}

// ===== 工厂方法 =====

pub fn make_person(id: u32, name: &str, created: &str) -> Person {
    Person {
        name: name.to_string(),
        created: created.to_string(),
        url: format!("https://swapi.info/api/people/{id}/"),
        ..Person::default()
    }
}

pub fn make_planet(id: u32, name: &str, created: &str) -> Planet {
    Planet {
        name: name.to_string(),
        created: created.to_string(),
        url: format!("https://swapi.info/api/planets/{id}/"),
        ..Planet::default()
    }
}

/// Luke Skywalker, C-3PO, R2-D2 in upstream order.
pub fn sample_people() -> Vec<Person> {
    let mut luke = make_person(1, "Luke Skywalker", "2014-12-09T13:50:51.644000Z");
    luke.height = "172".to_string();
    luke.birth_year = "19BBY".to_string();
    luke.homeworld = "https://swapi.info/api/planets/1/".to_string();

    vec![
        luke,
        make_person(2, "C-3PO", "2014-12-10T15:10:51.357000Z"),
        make_person(3, "R2-D2", "2014-12-10T15:11:50.376000Z"),
    ]
}

/// `Person 1` … `Person n`, created one minute apart.
pub fn generated_people(count: u32) -> Vec<Person> {
    (1..=count)
        .map(|i| {
            let created = format!("2014-12-10T{:02}:{:02}:00.000000Z", i / 60, i % 60);
            make_person(i, &format!("Person {i}"), &created)
        })
        .collect()
}

pub fn sample_planets() -> Vec<Planet> {
    let mut tatooine = make_planet(1, "Tatooine", "2014-12-09T13:50:49.641000Z");
    tatooine.climate = "arid".to_string();
    tatooine.population = "200000".to_string();

    vec![
        tatooine,
        make_planet(2, "Alderaan", "2014-12-10T11:35:48.479000Z"),
        make_planet(3, "Yavin IV", "2014-12-10T11:37:19.144000Z"),
    ]
}
