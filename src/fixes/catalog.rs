//! Fix templates with illustrative Swift snippets

use super::{Fix, Level};
use crate::models::IssueType::*;

pub(super) fn excessive_rerender() -> Vec<Fix> {
    vec![
        Fix::new(
            "equatable-view",
            "Implement Equatable on View",
            "Make the view conform to Equatable to control when it re-renders based on meaningful state changes.",
            "SwiftUI can skip re-rendering if it knows the view hasn't meaningfully changed.",
            Level::Low,
            Level::High,
        )
        .code(
            r#"struct ItemRow: View {
    let item: Item

    var body: some View {
        HStack {
            Text(item.name)
            Spacer()
            Text(item.price, format: .currency(code: "USD"))
        }
    }
}"#,
            r#"struct ItemRow: View, Equatable {
    let item: Item

    static func == (lhs: ItemRow, rhs: ItemRow) -> Bool {
        lhs.item.id == rhs.item.id &&
        lhs.item.name == rhs.item.name &&
        lhs.item.price == rhs.item.price
    }

    var body: some View {
        HStack {
            Text(item.name)
            Spacer()
            Text(item.price, format: .currency(code: "USD"))
        }
    }
}"#,
        )
        .steps(&[
            "Add Equatable conformance to the view struct",
            "Implement == to compare only properties that affect rendering",
            "Wrap usage in EquatableView if needed: EquatableView(content: ItemRow(item: item))",
        ])
        .applies_to(&[ExcessiveRerender]),
        Fix::new(
            "extract-subview",
            "Extract frequently-updating parts to subviews",
            "Move the frequently-changing content into a separate child view so parent doesn't re-render.",
            "SwiftUI's diffing works at the view level. Smaller views = more granular updates.",
            Level::Medium,
            Level::High,
        )
        .code(
            r#"struct ContentView: View {
    @State private var counter = 0
    @State private var items: [Item] = []

    var body: some View {
        VStack {
            Text("Count: \(counter)")  // Changes frequently
            ForEach(items) { item in    // Expensive, rarely changes
                ItemRow(item: item)
            }
        }
    }
}"#,
            r#"struct ContentView: View {
    @State private var items: [Item] = []

    var body: some View {
        VStack {
            CounterView()  // Isolated - only this re-renders
            ForEach(items) { item in
                ItemRow(item: item)
            }
        }
    }
}

struct CounterView: View {
    @State private var counter = 0

    var body: some View {
        Text("Count: \(counter)")
    }
}"#,
        )
        .steps(&[
            "Identify the frequently-changing state",
            "Create a new View struct containing that state",
            "Move the relevant UI code to the new view",
            "Replace the original code with the new subview",
        ])
        .applies_to(&[ExcessiveRerender, CascadingUpdate]),
        Fix::new(
            "observable-macro",
            "Migrate to @Observable (iOS 17+)",
            "Replace @ObservableObject with @Observable for automatic fine-grained observation.",
            "@Observable tracks which properties each view actually reads and only triggers updates for those.",
            Level::Medium,
            Level::High,
        )
        .code(
            r#"class UserViewModel: ObservableObject {
    @Published var name: String = ""
    @Published var email: String = ""
    @Published var avatarURL: URL?
}

struct ProfileView: View {
    @ObservedObject var viewModel: UserViewModel
    // Re-renders when ANY property changes
}"#,
            r#"@Observable
class UserViewModel {
    var name: String = ""
    var email: String = ""
    var avatarURL: URL?
}

struct ProfileView: View {
    var viewModel: UserViewModel
    // Only re-renders when properties used in body change
}"#,
        )
        .steps(&[
            "Replace ObservableObject protocol with @Observable macro",
            "Remove @Published property wrappers",
            "Replace @ObservedObject with plain property or @Bindable",
            "Test that updates still propagate correctly",
        ])
        .applies_to(&[ExcessiveRerender, CascadingUpdate, WholeObjectPassing])
        .swift("5.9+")
        .reference("https://developer.apple.com/documentation/observation"),
    ]
}

pub(super) fn cascading_update() -> Vec<Fix> {
    vec![
        Fix::new(
            "derived-state",
            "Use derived/computed state",
            "Instead of storing derived values, compute them from source of truth.",
            "Derived state doesn't need separate updates - it's always consistent with source.",
            Level::Low,
            Level::Medium,
        )
        .code(
            r#"class ShoppingCart: ObservableObject {
    @Published var items: [CartItem] = []
    @Published var totalPrice: Decimal = 0  // Updated manually
    @Published var itemCount: Int = 0       // Updated manually

    func addItem(_ item: CartItem) {
        items.append(item)
        totalPrice = items.reduce(0) { $0 + $1.price }
        itemCount = items.count
    }
}"#,
            r#"class ShoppingCart: ObservableObject {
    @Published var items: [CartItem] = []

    var totalPrice: Decimal {
        items.reduce(0) { $0 + $1.price }
    }

    var itemCount: Int {
        items.count
    }

    func addItem(_ item: CartItem) {
        items.append(item)
        // Derived properties update automatically
    }
}"#,
        )
        .steps(&[
            "Identify state that's derived from other state",
            "Convert @Published var to computed var",
            "Remove manual update code",
            "If computation is expensive, consider caching with care",
        ])
        .applies_to(&[CascadingUpdate]),
        Fix::new(
            "split-state",
            "Split large state objects",
            "Break monolithic state into smaller, focused state objects.",
            "Smaller state objects mean views can subscribe to only what they need.",
            Level::High,
            Level::High,
        )
        .code(
            r#"class AppState: ObservableObject {
    @Published var user: User?
    @Published var settings: Settings
    @Published var cart: ShoppingCart
    @Published var notifications: [Notification]
    // Every view observing AppState re-renders on any change
}"#,
            r#"class UserState: ObservableObject {
    @Published var user: User?
}

class SettingsState: ObservableObject {
    @Published var settings: Settings
}

class CartState: ObservableObject {
    @Published var cart: ShoppingCart
}

// Views only observe what they need
struct ProfileView: View {
    @EnvironmentObject var userState: UserState
    // Only re-renders when user changes
}"#,
        )
        .steps(&[
            "Identify logical groupings in your state",
            "Create separate ObservableObject classes for each group",
            "Update views to observe only needed state objects",
            "Consider using @Environment for dependency injection",
        ])
        .applies_to(&[CascadingUpdate, WholeObjectPassing]),
    ]
}

pub(super) fn frequent_trigger() -> Vec<Fix> {
    vec![
        Fix::new(
            "debounce",
            "Debounce rapid updates",
            "Delay processing until updates stop for a short period.",
            "Prevents rapid-fire updates from causing excessive re-renders.",
            Level::Low,
            Level::High,
        )
        .code(
            r#"TextField("Search", text: $searchText)
    .onChange(of: searchText) { newValue in
        performSearch(newValue)  // Fires on every keystroke
    }"#,
            r#"TextField("Search", text: $searchText)
    .onChange(of: searchText) { newValue in
        searchDebouncer.send(newValue)
    }
    .onReceive(searchDebouncer.debounce(for: .milliseconds(300), scheduler: RunLoop.main)) { value in
        performSearch(value)  // Only fires 300ms after typing stops
    }

// Property:
let searchDebouncer = PassthroughSubject<String, Never>()"#,
        )
        .steps(&[
            "Create a PassthroughSubject for the trigger",
            "Send values to the subject instead of processing directly",
            "Use .debounce() to delay processing",
            "Process values in onReceive after debounce",
        ])
        .applies_to(&[FrequentTrigger]),
        Fix::new(
            "throttle",
            "Throttle continuous updates",
            "Limit update frequency to a maximum rate.",
            "Ensures updates happen at most once per interval, even if triggered more often.",
            Level::Low,
            Level::Medium,
        )
        .code(
            r#"ScrollView {
    // onScroll fires continuously during scroll
}
.onScroll { offset in
    updateHeaderOpacity(for: offset)  // Too frequent
}"#,
            r#"ScrollView {
    // ...
}
.onScroll { offset in
    scrollThrottler.send(offset)
}
.onReceive(scrollThrottler.throttle(for: .milliseconds(16), scheduler: RunLoop.main, latest: true)) { offset in
    updateHeaderOpacity(for: offset)  // Max 60fps
}"#,
        )
        .steps(&[
            "Create a PassthroughSubject for the event",
            "Send values to the subject on each event",
            "Use .throttle() to limit frequency",
            "Process the latest value at the throttled rate",
        ])
        .applies_to(&[FrequentTrigger]),
    ]
}

pub(super) fn deep_chain() -> Vec<Fix> {
    vec![
        Fix::new(
            "flatten-hierarchy",
            "Flatten the view hierarchy",
            "Reduce nesting levels by combining related views.",
            "Fewer levels means shorter update propagation paths.",
            Level::Medium,
            Level::Medium,
        )
        .steps(&[
            "Identify deeply nested view hierarchies",
            "Look for wrapper views that only add layout",
            "Combine related views where possible",
            "Use ViewBuilder to compose without nesting",
        ])
        .applies_to(&[DeepDependencyChain]),
        Fix::new(
            "direct-observation",
            "Use direct observation instead of passing through",
            "Have child views observe state directly via @EnvironmentObject.",
            "Bypasses intermediate views that would otherwise need to pass data down.",
            Level::Medium,
            Level::High,
        )
        .code(
            r#"// State passed through every level
struct GrandparentView: View {
    @StateObject var state = AppState()
    var body: some View {
        ParentView(state: state)
    }
}

struct ParentView: View {
    let state: AppState
    var body: some View {
        ChildView(state: state)  // Just passing through
    }
}"#,
            r#"// State injected via environment
struct GrandparentView: View {
    @StateObject var state = AppState()
    var body: some View {
        ParentView()
            .environmentObject(state)
    }
}

struct ParentView: View {
    var body: some View {
        ChildView()  // No need to pass state
    }
}

struct ChildView: View {
    @EnvironmentObject var state: AppState
    // Observes directly
}"#,
        )
        .steps(&[
            "Identify state being passed through multiple levels",
            "Inject state using .environmentObject() at appropriate level",
            "Replace parameter passing with @EnvironmentObject",
            "Remove intermediate parameters",
        ])
        .applies_to(&[DeepDependencyChain, CascadingUpdate]),
    ]
}

pub(super) fn timer_cascade() -> Vec<Fix> {
    vec![
        Fix::new(
            "timeline-view",
            "Use TimelineView for animations",
            "TimelineView is optimized for time-based updates and animations.",
            "TimelineView integrates with SwiftUI's rendering pipeline for smooth animations.",
            Level::Low,
            Level::High,
        )
        .code(
            r#"struct ClockView: View {
    @State private var date = Date()
    let timer = Timer.publish(every: 1, on: .main, in: .common).autoconnect()

    var body: some View {
        Text(date, style: .time)
            .onReceive(timer) { date = $0 }
    }
}"#,
            r#"struct ClockView: View {
    var body: some View {
        TimelineView(.periodic(from: .now, by: 1)) { context in
            Text(context.date, style: .time)
        }
    }
}"#,
        )
        .steps(&[
            "Replace Timer with TimelineView",
            "Choose appropriate schedule (.periodic, .animation, .everyMinute)",
            "Access current time via context.date",
            "Remove @State for time tracking",
        ])
        .applies_to(&[TimerCascade])
        .swift("5.5+"),
        Fix::new(
            "limit-timer-scope",
            "Limit timer observation scope",
            "Only the view that needs time should observe the timer.",
            "Prevents timer ticks from cascading to unrelated views.",
            Level::Low,
            Level::High,
        )
        .code(
            r#"struct ParentView: View {
    @State private var time = Date()
    let timer = Timer.publish(every: 1, on: .main, in: .common).autoconnect()

    var body: some View {
        VStack {
            TimeDisplay(time: time)
            ExpensiveListView()  // Re-renders every second!
        }
        .onReceive(timer) { time = $0 }
    }
}"#,
            r#"struct ParentView: View {
    var body: some View {
        VStack {
            TimeDisplay()  // Timer is isolated here
            ExpensiveListView()  // No longer affected
        }
    }
}

struct TimeDisplay: View {
    @State private var time = Date()
    let timer = Timer.publish(every: 1, on: .main, in: .common).autoconnect()

    var body: some View {
        Text(time, style: .time)
            .onReceive(timer) { time = $0 }
    }
}"#,
        )
        .steps(&[
            "Identify which view actually needs the timer",
            "Move timer and @State to that specific view",
            "Ensure parent views don't hold timer-related state",
        ])
        .applies_to(&[TimerCascade]),
    ]
}

pub(super) fn whole_object() -> Vec<Fix> {
    vec![
        Fix::new(
            "pass-primitives",
            "Pass primitive values instead of objects",
            "Extract and pass only the specific properties a view needs.",
            "Primitive properties don't cause re-renders when unrelated object properties change.",
            Level::Low,
            Level::High,
        )
        .code(
            r#"struct UserCard: View {
    let user: User  // Whole object

    var body: some View {
        VStack {
            Text(user.name)
            Text(user.email)
        }
    }
}

// Usage triggers re-render when ANY user property changes
UserCard(user: user)"#,
            r#"struct UserCard: View {
    let name: String
    let email: String

    var body: some View {
        VStack {
            Text(name)
            Text(email)
        }
    }
}

// Usage only triggers re-render when name or email change
UserCard(name: user.name, email: user.email)"#,
        )
        .steps(&[
            "Identify which properties the view actually uses",
            "Change parameters from object to individual properties",
            "Update call sites to pass specific properties",
            "Consider using a focused protocol if many properties needed",
        ])
        .applies_to(&[WholeObjectPassing, ExcessiveRerender]),
        Fix::new(
            "focused-protocol",
            "Use focused protocols for required data",
            "Define a protocol with only the properties a view needs.",
            "Decouples view from specific model type while documenting requirements.",
            Level::Medium,
            Level::Medium,
        )
        .code(
            r#"struct ItemRow: View {
    let item: Item  // Has 20 properties, view uses 3

    var body: some View {
        HStack {
            Text(item.name)
            Text(item.price, format: .currency(code: "USD"))
            if item.isOnSale { SaleBadge() }
        }
    }
}"#,
            r#"protocol ItemRowData {
    var name: String { get }
    var price: Decimal { get }
    var isOnSale: Bool { get }
}

extension Item: ItemRowData {}

struct ItemRow<T: ItemRowData>: View {
    let item: T

    var body: some View {
        HStack {
            Text(item.name)
            Text(item.price, format: .currency(code: "USD"))
            if item.isOnSale { SaleBadge() }
        }
    }
}"#,
        )
        .steps(&[
            "Identify properties the view actually reads",
            "Create a protocol with only those properties",
            "Make your model conform to the protocol",
            "Change view to accept the protocol type",
        ])
        .applies_to(&[WholeObjectPassing]),
    ]
}
